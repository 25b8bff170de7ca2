//! IRC session tests.
//!
//! Drives `run_session` over an in-memory duplex stream, playing the server
//! side with a line-framed codec. Outbound lines are parsed back so the
//! assertions compare commands rather than exact spelling.

use futures_util::{SinkExt, StreamExt};
use slirc_bot::config::Config;
use slirc_bot::irc::run_session;
use slirc_bot::irc::wire::{self, Command};
use slirc_bot::{ClientError, CommandRegistry, Dispatcher, plugins};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::DuplexStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::codec::{Framed, LinesCodec};

const TIMEOUT: Duration = Duration::from_secs(5);

type Server = Framed<DuplexStream, LinesCodec>;

struct Harness {
    server: Server,
    shutdown: Option<oneshot::Sender<()>>,
    session: JoinHandle<Result<(), ClientError>>,
}

impl Harness {
    fn start(config_toml: &str) -> Self {
        let config: Config = toml::from_str(config_toml).expect("valid test config");

        let registry = Arc::new(CommandRegistry::new());
        plugins::register_all(&registry);
        let dispatcher = Arc::new(Dispatcher::new(registry, config.bot.command_prefix.clone()));

        let (client_io, server_io) = tokio::io::duplex(16 * 1024);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let session = tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            run_session(client_io, &config, dispatcher, shutdown).await
        });

        Self {
            server: Framed::new(server_io, LinesCodec::new()),
            shutdown: Some(shutdown_tx),
            session,
        }
    }

    async fn send(&mut self, line: &str) {
        self.server.send(line).await.expect("server write");
    }

    /// Next raw line the bot wrote, CRLF stripped.
    async fn recv_line(&mut self) -> String {
        tokio::time::timeout(TIMEOUT, self.server.next())
            .await
            .expect("timed out waiting for the bot")
            .expect("bot closed the stream")
            .expect("line decode")
    }

    /// Next command the bot sent.
    async fn recv(&mut self) -> Command {
        let line = self.recv_line().await;
        wire::parse(&line)
            .unwrap_or_else(|| panic!("bot sent an unparseable line: {line:?}"))
            .command
    }

    /// Consume NICK/USER and complete registration.
    async fn register(&mut self, nick: &str) {
        assert_eq!(self.recv().await, Command::NICK(nick.into()));
        assert!(matches!(self.recv().await, Command::USER(..)));
        self.send(&format!(":irc.test 001 {nick} :Welcome to the test network"))
            .await;
    }

    /// Wait for the session to end, keeping the server side and the
    /// shutdown sender alive meanwhile.
    async fn finish(self) -> Result<(), ClientError> {
        let Harness {
            server: _server,
            shutdown: _shutdown,
            session,
        } = self;
        tokio::time::timeout(TIMEOUT, session)
            .await
            .expect("session did not end")
            .expect("session task panicked")
    }
}

fn privmsg(target: &str, text: &str) -> Command {
    Command::PRIVMSG(target.into(), text.into())
}

fn join(channel: &str) -> Command {
    Command::JOIN(channel.into(), None, None)
}

const CONFIG: &str = r##"
[server]
address = "irc.test:6667"

[identity]
nick = "slircbot"

[bot]
channels = ["#chan", "#other"]
"##;

/// Session registered as `slircbot` with both channel JOINs consumed.
async fn joined() -> Harness {
    let mut h = Harness::start(CONFIG);
    h.register("slircbot").await;
    assert_eq!(h.recv().await, join("#chan"));
    assert_eq!(h.recv().await, join("#other"));
    h
}

#[tokio::test]
async fn registers_then_joins_channels() {
    let mut h = Harness::start(CONFIG);

    assert_eq!(h.recv().await, Command::NICK("slircbot".into()));
    assert_eq!(
        h.recv().await,
        Command::USER("slircbot".into(), "0".into(), "slircbot".into())
    );

    h.send(":irc.test 001 slircbot :Welcome").await;
    assert_eq!(h.recv().await, join("#chan"));
    assert_eq!(h.recv().await, join("#other"));
}

#[tokio::test]
async fn password_is_sent_first() {
    let mut h = Harness::start(
        r#"
[server]
address = "irc.test:6667"
password = "hunter2"

[identity]
nick = "slircbot"
user = "bot"
realname = "Straylight Bot"
"#,
    );

    assert_eq!(h.recv().await, Command::PASS("hunter2".into()));
    assert_eq!(h.recv().await, Command::NICK("slircbot".into()));
    assert_eq!(h.recv_line().await, "USER bot 0 * :Straylight Bot");
}

#[tokio::test]
async fn answers_ping() {
    let mut h = joined().await;

    h.send("PING :irc.test").await;
    assert_eq!(h.recv().await, Command::PONG("irc.test".into(), None));
}

#[tokio::test]
async fn channel_command_replies_in_channel() {
    let mut h = joined().await;

    h.send(":alice!a@host PRIVMSG #chan :!echo hello world").await;
    assert_eq!(h.recv_line().await, "PRIVMSG #chan :hello world");
}

#[tokio::test]
async fn private_command_replies_to_sender() {
    let mut h = joined().await;

    h.send(":alice!a@host PRIVMSG slircbot :!echo psst").await;
    assert_eq!(h.recv().await, privmsg("alice", "psst"));
}

#[tokio::test]
async fn help_goes_over_the_wire() {
    let mut h = joined().await;

    h.send(":alice!a@host PRIVMSG #chan :!help").await;
    assert_eq!(
        h.recv().await,
        privmsg(
            "#chan",
            "Type: '!help <command>' to see details about a specific command."
        )
    );
    assert_eq!(
        h.recv().await,
        privmsg("#chan", "Available commands: echo, roll, time")
    );
}

#[tokio::test]
async fn command_error_is_reported() {
    let mut h = joined().await;

    h.send(":alice!a@host PRIVMSG #chan :!roll banana").await;
    assert_eq!(
        h.recv().await,
        privmsg(
            "#chan",
            "Error executing roll: invalid argument: expected NdM, got 'banana'"
        )
    );
}

#[tokio::test]
async fn plain_chat_and_ctcp_are_ignored() {
    let mut h = joined().await;

    h.send(":alice!a@host PRIVMSG #chan :just chatting").await;
    h.send(":alice!a@host PRIVMSG slircbot :\x01VERSION\x01").await;
    h.send("PING :after").await;
    assert_eq!(h.recv().await, Command::PONG("after".into(), None));
}

#[tokio::test]
async fn nick_collision_appends_underscore() {
    let mut h = Harness::start(CONFIG);
    assert_eq!(h.recv().await, Command::NICK("slircbot".into()));
    h.recv().await;

    h.send(":irc.test 433 * slircbot :Nickname is already in use").await;
    assert_eq!(h.recv().await, Command::NICK("slircbot_".into()));

    h.send(":irc.test 001 slircbot_ :Welcome").await;
    assert_eq!(h.recv().await, join("#chan"));
    assert_eq!(h.recv().await, join("#other"));

    // Private messages are now addressed to the new nick
    h.send(":alice!a@host PRIVMSG slircbot_ :!echo hi").await;
    assert_eq!(h.recv().await, privmsg("alice", "hi"));
}

#[tokio::test]
async fn server_nick_change_is_tracked() {
    let mut h = joined().await;

    h.send(":slircbot!b@host NICK :botty").await;
    h.send(":alice!a@host PRIVMSG botty :!echo moved").await;
    assert_eq!(h.recv().await, privmsg("alice", "moved"));
}

#[tokio::test]
async fn custom_prefix_from_config() {
    let mut h = Harness::start(
        r#"
[server]
address = "irc.test:6667"

[identity]
nick = "slircbot"

[bot]
command_prefix = "."
"#,
    );
    h.register("slircbot").await;

    h.send(":alice!a@host PRIVMSG #chan :!echo ignored").await;
    h.send(":alice!a@host PRIVMSG #chan :.echo seen").await;
    assert_eq!(h.recv().await, privmsg("#chan", "seen"));
}

#[tokio::test]
async fn shutdown_sends_quit() {
    let mut h = joined().await;

    h.shutdown.take().expect("shutdown sender").send(()).unwrap();
    assert_eq!(
        h.recv().await,
        Command::QUIT(Some("slirc-bot shutting down".into()))
    );
    assert!(h.finish().await.is_ok());
}

#[tokio::test]
async fn server_error_ends_session() {
    let mut h = Harness::start(CONFIG);
    h.register("slircbot").await;

    h.send("ERROR :Closing link: too many bots").await;
    match h.finish().await {
        Err(ClientError::Closed(reason)) => assert_eq!(reason, "Closing link: too many bots"),
        other => panic!("expected Closed, got {other:?}"),
    }
}

#[tokio::test]
async fn bad_password_is_a_registration_error() {
    let mut h = Harness::start(CONFIG);
    h.recv().await;
    h.recv().await;

    h.send(":irc.test 464 slircbot :Password incorrect").await;
    assert!(matches!(
        h.finish().await,
        Err(ClientError::Registration(reason)) if reason == "Password incorrect"
    ));
}

#[tokio::test]
async fn eof_ends_session() {
    let Harness {
        server,
        shutdown: _shutdown,
        session,
    } = Harness::start(CONFIG);
    drop(server);

    let result = tokio::time::timeout(TIMEOUT, session)
        .await
        .expect("session did not end")
        .expect("session task panicked");
    assert!(matches!(result, Err(ClientError::Closed(_))));
}
