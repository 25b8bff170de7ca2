//! IRC session loop.
//!
//! Connects, registers, keeps the session alive (PING/PONG, nick collisions)
//! and feeds every PRIVMSG that looks like a command to the [`Dispatcher`].
//! Replies flow back through [`IrcConnection`] into a writer task that owns
//! the socket's write half.

use super::connection::IrcConnection;
use super::tls;
use super::wire::{self, Command, Message, Response};
use crate::commands::{Connection, Dispatcher};
use crate::config::Config;
use crate::error::ClientError;
use futures_util::{SinkExt, StreamExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, info, trace, warn};

/// Longest inbound line accepted (IRCv3 tags plus the 512-byte body).
const MAX_LINE_LENGTH: usize = 8191;

/// How long queued replies get to flush after the session ends.
const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

const QUIT_MESSAGE: &str = "slirc-bot shutting down";

/// Connect to the configured server and run a session until `shutdown`
/// resolves or the server goes away.
pub async fn run<F>(
    config: &Config,
    dispatcher: Arc<Dispatcher>,
    shutdown: F,
) -> Result<(), ClientError>
where
    F: Future<Output = ()>,
{
    let tcp = TcpStream::connect(&config.server.address).await?;
    info!(address = %config.server.address, tls = config.server.tls, "Connected to server");

    if config.server.tls {
        let stream =
            tls::upgrade_to_tls(tcp, config.server.host(), config.server.verify_cert).await?;
        run_session(stream, config, dispatcher, shutdown).await
    } else {
        run_session(tcp, config, dispatcher, shutdown).await
    }
}

/// Run the IRC protocol over an already-established stream.
pub async fn run_session<S, F>(
    stream: S,
    config: &Config,
    dispatcher: Arc<Dispatcher>,
    shutdown: F,
) -> Result<(), ClientError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    F: Future<Output = ()>,
{
    let framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
    let (mut sink, mut lines) = framed.split::<String>();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let writer = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            trace!(line = %line, "->");
            // LinesCodec terminates with '\n'; IRC wants CRLF
            if let Err(e) = sink.send(format!("{line}\r")).await {
                warn!(error = %e, "Write failed, stopping writer");
                break;
            }
        }
        let _ = sink.close().await;
    });

    let conn = Arc::new(IrcConnection::new(config.identity.nick.clone(), tx));
    let mut session = Session {
        config,
        dispatcher,
        conn: Arc::clone(&conn),
        registered: false,
    };
    session.register();

    tokio::pin!(shutdown);
    let result = loop {
        tokio::select! {
            line = lines.next() => match line {
                Some(Ok(line)) => {
                    if let Err(e) = session.handle_line(&line) {
                        break Err(e);
                    }
                }
                Some(Err(e)) => break Err(e.into()),
                None => break Err(ClientError::Closed("end of stream".into())),
            },
            () = &mut shutdown => {
                info!("Shutdown requested, quitting");
                conn.send(&wire::quit(QUIT_MESSAGE));
                break Ok(());
            }
        }
    };

    // The writer stops once every connection handle (including those held by
    // in-flight command handlers) is dropped.
    drop(session);
    drop(conn);
    if tokio::time::timeout(WRITER_DRAIN_TIMEOUT, writer).await.is_err() {
        warn!("Timed out flushing outbound queue");
    }

    result
}

struct Session<'a> {
    config: &'a Config,
    dispatcher: Arc<Dispatcher>,
    conn: Arc<IrcConnection>,
    /// Set once RPL_WELCOME arrives.
    registered: bool,
}

impl Session<'_> {
    fn register(&self) {
        let identity = &self.config.identity;
        if let Some(password) = &self.config.server.password {
            self.conn.send(&wire::pass(password));
        }
        self.conn.send(&wire::nick(&identity.nick));
        self.conn
            .send(&wire::user(identity.user(), identity.realname()));
    }

    fn handle_line(&mut self, line: &str) -> Result<(), ClientError> {
        let Some(msg) = wire::parse(line) else {
            return Ok(());
        };
        trace!(line = %line, "<-");

        match &msg.command {
            Command::PING(token, _) => {
                self.conn.send(&wire::pong(token));
            }
            // The first param is the nick the server gave us
            Command::Response(Response::RPL_WELCOME, params) => {
                if let Some(nick) = params.first() {
                    self.conn.set_nick(nick.as_str());
                }
                self.registered = true;
                info!(nick = %self.conn.own_nick(), "Registered with server");
                for channel in &self.config.bot.channels {
                    info!(channel = %channel, "Joining");
                    self.conn.send(&wire::join(channel));
                }
            }
            // Retry with a suffix, only while registering
            Command::Response(Response::ERR_NICKNAMEINUSE, _) if !self.registered => {
                let nick = format!("{}_", self.conn.own_nick());
                warn!(nick = %nick, "Nickname in use, retrying");
                self.conn.set_nick(nick.as_str());
                self.conn.send(&wire::nick(&nick));
            }
            Command::Response(Response::ERR_PASSWDMISMATCH, params) => {
                let reason = params.last().cloned().unwrap_or_default();
                return Err(ClientError::Registration(reason));
            }
            Command::NICK(nick) => {
                if msg.source_nickname() == Some(self.conn.own_nick().as_str()) {
                    info!(nick = %nick, "Nick changed");
                    self.conn.set_nick(nick.as_str());
                }
            }
            Command::PRIVMSG(target, text) => self.dispatch(&msg, target, text),
            Command::ERROR(reason) => {
                return Err(ClientError::Closed(reason.clone()));
            }
            _ => {}
        }
        Ok(())
    }

    /// Hand a PRIVMSG to the dispatcher on the blocking pool, so a slow
    /// handler never stalls the reader.
    fn dispatch(&self, msg: &Message, target: &str, text: &str) {
        let Some(sender) = msg.source_nickname() else {
            return;
        };
        // CTCP and plain chat never reach the dispatcher
        if text.starts_with('\x01') || !text.starts_with(self.dispatcher.prefix()) {
            return;
        }

        let dispatcher = Arc::clone(&self.dispatcher);
        let conn = Arc::clone(&self.conn);
        let (sender, target, text) = (sender.to_owned(), target.to_owned(), text.to_owned());
        tokio::task::spawn_blocking(move || {
            let outcome = dispatcher.message_received(&target, &text, &sender, &*conn);
            debug!(?outcome, sender = %sender, target = %target, "Dispatched");
        });
    }
}
