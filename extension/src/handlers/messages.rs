//! Background message responder

use async_trait::async_trait;
use std::sync::Arc;

use markurz_core::{BridgeError, Message, MessageHandler, Request, Response};

use crate::state::BackgroundState;

/// Answers runtime messages addressed to the background context. Only
/// `GET_COOKIE` carries a real answer; everything else is acknowledged and
/// ignored so a misdirected message can never wedge a caller.
pub struct BackgroundResponder {
    state: Arc<BackgroundState>,
}

impl BackgroundResponder {
    pub fn new(state: Arc<BackgroundState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl MessageHandler for BackgroundResponder {
    async fn handle(&self, message: Message) -> Result<Response, BridgeError> {
        match message {
            Message::Request(Request::GetCookie) => Ok(Response::Cookie {
                token: self.state.current_token().await,
            }),
            other => {
                tracing::debug!(?other, "Ignoring message not meant for the background");
                Ok(Response::Ack)
            }
        }
    }
}
