use std::collections::HashSet;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{DomainError, ErrorCode};
use crate::extractors::current_user::CurrentUser;
use crate::protocol::actions::PlayerActionMessage;
use crate::state::app_state::AppState;
use crate::ws::hub::ActionBroadcast;
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(Uuid::new_v4(), current_user, app_state);
    ws::start(session, &req, stream)
}

/// One authenticated WebSocket connection. It routes actions to the game
/// flow service and relays session broadcasts.
pub struct WsSession {
    conn_id: Uuid,
    user: CurrentUser,
    app_state: web::Data<AppState>,
    subscriptions: HashSet<String>,

    last_heartbeat: Instant,
    heartbeat_handle: Option<SpawnHandle>,
}

impl WsSession {
    fn new(conn_id: Uuid, user: CurrentUser, app_state: web::Data<AppState>) -> Self {
        Self {
            conn_id,
            user,
            app_state,
            subscriptions: HashSet::new(),
            last_heartbeat: Instant::now(),
            heartbeat_handle: None,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, err: &DomainError) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code: err.code(),
                error_message: err.detail().to_string(),
            },
        );
    }

    fn send_error_and_close(
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code,
                error_message: message.into(),
            },
        );
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let handle = ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    user_id = actor.user.id,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
        self.heartbeat_handle = Some(handle);
    }

    fn subscribe(&mut self, token: String, ctx: &mut ws::WebsocketContext<Self>) {
        let game_flow = self.app_state.game_flow.clone();
        let user_id = self.user.id;

        ctx.spawn(
            async move {
                let res = game_flow.ensure_member(&token, user_id).await;
                (token, res)
            }
            .into_actor(self)
            .map(|(token, res), actor, ctx| match res {
                Ok(()) => {
                    let recipient = ctx.address().recipient::<ActionBroadcast>();
                    actor.app_state.hub.register(&token, actor.conn_id, recipient);
                    debug!(conn_id = %actor.conn_id, token = %token, "[WS SESSION] subscribed");
                    actor.subscriptions.insert(token);
                    Self::send_json(
                        ctx,
                        &ServerMsg::Ack {
                            message: "subscribed".to_string(),
                        },
                    );
                }
                Err(err) => Self::send_error(ctx, &err),
            }),
        );
    }

    fn unsubscribe(&mut self, token: &str, ctx: &mut ws::WebsocketContext<Self>) {
        self.app_state.hub.unregister(token, self.conn_id);
        self.subscriptions.remove(token);
        Self::send_json(
            ctx,
            &ServerMsg::Ack {
                message: "unsubscribed".to_string(),
            },
        );
    }

    fn handle_action(&mut self, msg: PlayerActionMessage, ctx: &mut ws::WebsocketContext<Self>) {
        let action = match msg.parse() {
            Ok(action) => action,
            Err(err) => {
                Self::send_error(ctx, &err);
                return;
            }
        };

        let game_flow = self.app_state.game_flow.clone();
        let user_id = self.user.id;
        let token = action.token.clone();

        ctx.spawn(
            async move { game_flow.handle_action(user_id, action).await }
                .into_actor(self)
                .map(move |res, actor, ctx| match res {
                    // subscribers already got it from the game flow service
                    Ok(result) => {
                        if !actor.subscriptions.contains(&token) {
                            Self::send_json(ctx, &ServerMsg::ActionResult(result));
                        }
                    }
                    Err(err) => Self::send_error(ctx, &err),
                }),
        );
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            user_id = self.user.id,
            "[WS SESSION] started"
        );
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, ctx: &mut Self::Context) {
        if let Some(handle) = self.heartbeat_handle.take() {
            ctx.cancel_future(handle);
        }
        self.app_state.hub.unregister_connection(self.conn_id);
        info!(
            conn_id = %self.conn_id,
            user_id = self.user.id,
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                let Ok(cmd) = serde_json::from_str::<ClientMsg>(&text) else {
                    Self::send_error_and_close(ctx, ErrorCode::BadRequest, "Malformed JSON");
                    return;
                };

                match cmd {
                    ClientMsg::Subscribe { game_session_token } => {
                        self.subscribe(game_session_token, ctx)
                    }
                    ClientMsg::Unsubscribe { game_session_token } => {
                        self.unsubscribe(&game_session_token, ctx)
                    }
                    ClientMsg::Action(action) => self.handle_action(action, ctx),
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error_and_close(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    user_id = self.user.id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<ActionBroadcast> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: ActionBroadcast, ctx: &mut Self::Context) -> Self::Result {
        if self.subscriptions.contains(&msg.token) {
            Self::send_json(ctx, &ServerMsg::ActionResult(msg.result));
        }
    }
}
