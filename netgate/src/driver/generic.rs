//! Generic driver implementation that works with any platform.

use std::time::{Duration, Instant};

use log::{debug, warn};
use regex::bytes::Regex;

use super::Driver;
use super::config_session::ConfigSession;
use super::privilege::PrivilegeManager;
use super::response::{Response, normalize_output};
use crate::channel::PtyChannel;
use crate::error::{DriverError, PlatformError, Result};
use crate::platform::PlatformDefinition;
use crate::transport::SshTransport;
use crate::transport::config::SshConfig;

/// Live connection state: the SSH session and its shell channel.
struct Connection {
    transport: SshTransport,
    channel: PtyChannel,
}

/// Driver for any platform definition.
///
/// Handles:
/// - SSH transport and PTY channel lifetime
/// - Command execution with prompt detection
/// - Privilege level navigation
pub struct GenericDriver {
    ssh_config: SshConfig,

    platform: PlatformDefinition,

    /// None when disconnected.
    connection: Option<Connection>,

    privilege_manager: PrivilegeManager,

    /// Default timeout for reads.
    timeout: Duration,

    /// Combined prompt pattern for all privilege levels.
    prompt_pattern: Regex,

    /// Prompts plus the platform's confirmation questions; ends a read.
    wait_pattern: Regex,
}

impl GenericDriver {
    /// Create a new driver. Nothing is connected until [`Driver::open`].
    pub fn new(ssh_config: SshConfig, platform: PlatformDefinition) -> Result<Self> {
        let timeout = ssh_config.timeout;
        platform.validate()?;
        let privilege_manager = PrivilegeManager::new(&platform);
        let prompts: Vec<&Regex> = platform
            .privilege_levels
            .values()
            .map(|level| &level.pattern)
            .collect();
        let prompt_pattern = Self::build_combined_pattern(prompts.iter().copied())?;
        let wait_pattern = Self::build_combined_pattern(
            prompts
                .into_iter()
                .chain(platform.confirmations.iter().map(|c| &c.pattern)),
        )?;

        Ok(Self {
            ssh_config,
            platform,
            connection: None,
            privilege_manager,
            timeout,
            prompt_pattern,
            wait_pattern,
        })
    }

    /// Build a regex that matches any of `patterns`.
    fn build_combined_pattern<'a>(patterns: impl Iterator<Item = &'a Regex>) -> Result<Regex> {
        let combined = patterns
            .map(|pattern| format!("(?:{})", pattern.as_str()))
            .collect::<Vec<_>>()
            .join("|");

        Regex::new(&combined).map_err(|e| {
            PlatformError::InvalidDefinition {
                message: format!("combined prompt pattern: {e}"),
            }
            .into()
        })
    }

    pub fn prompt_pattern(&self) -> &Regex {
        &self.prompt_pattern
    }

    pub fn platform(&self) -> &PlatformDefinition {
        &self.platform
    }

    pub fn privilege_manager(&self) -> &PrivilegeManager {
        &self.privilege_manager
    }

    /// Enter configuration mode. See [`ConfigSession`].
    pub async fn config_session(&mut self) -> Result<ConfigSession<'_>> {
        ConfigSession::new(self).await
    }

    fn channel(&mut self) -> Result<&mut PtyChannel> {
        self.connection
            .as_mut()
            .map(|c| &mut c.channel)
            .ok_or_else(|| DriverError::NotConnected.into())
    }

    /// Read until a prompt is matched and update the current privilege.
    ///
    /// A confirmation question from the platform definition is answered and
    /// the read goes on; the question and the answer's echo stay in the
    /// returned text.
    ///
    /// Returns the raw text (prompt included) and the trimmed prompt.
    async fn read_until_prompt(&mut self) -> Result<(String, String)> {
        let Self {
            connection,
            platform,
            privilege_manager,
            timeout,
            prompt_pattern,
            wait_pattern,
            ..
        } = self;
        let channel = connection
            .as_mut()
            .map(|c| &mut c.channel)
            .ok_or(DriverError::NotConnected)?;
        let mut raw = Vec::new();

        loop {
            let data = match channel.read_until_pattern(wait_pattern, *timeout).await {
                Ok(data) => data,
                Err(e) => {
                    let tail = String::from_utf8_lossy(channel.pending().last_line()).to_string();
                    debug!("no prompt matched, last line seen: {:?}", tail);
                    return Err(e);
                }
            };
            raw.extend_from_slice(&data);

            let line = last_line(&data);
            if prompt_pattern.is_match(line) {
                break;
            }
            match platform.confirmation_for(line) {
                Some(confirmation) => {
                    warn!(
                        "device asked {:?}, answering {:?}",
                        String::from_utf8_lossy(line).trim(),
                        confirmation.answer
                    );
                    channel.send(&confirmation.answer).await?;
                }
                None => break,
            }
        }

        let prompt = prompt_pattern
            .find_iter(&raw)
            .last()
            .map(|m| String::from_utf8_lossy(&raw[m.start()..]).trim().to_string())
            .unwrap_or_default();

        if privilege_manager.observe_prompt(&prompt).is_none() {
            warn!("prompt {:?} matches no privilege level", prompt);
        }

        Ok((String::from_utf8_lossy(&raw).to_string(), prompt))
    }

    async fn execute_on_open_commands(&mut self) -> Result<()> {
        for cmd in self.platform.on_open_commands.clone() {
            self.send_command(&cmd).await?;
        }
        Ok(())
    }
}

/// Text after the last newline.
fn last_line(data: &[u8]) -> &[u8] {
    match memchr::memrchr(b'\n', data) {
        Some(pos) => &data[pos + 1..],
        None => data,
    }
}

impl Driver for GenericDriver {
    async fn open(&mut self) -> Result<()> {
        if self.connection.is_some() {
            return Err(DriverError::AlreadyConnected.into());
        }

        let transport = SshTransport::connect(&self.ssh_config).await?;
        let channel = match transport.open_channel().await {
            Ok(channel) => PtyChannel::new(channel),
            Err(e) => {
                if let Err(close_err) = transport.close().await {
                    debug!(
                        "{}: close after failed channel open: {}",
                        self.ssh_config.target(),
                        close_err
                    );
                }
                return Err(e);
            }
        };
        self.connection = Some(Connection { transport, channel });

        let (_, prompt) = self.read_until_prompt().await?;
        debug!(
            "{}: initial prompt {:?} ({:?})",
            self.ssh_config.target(),
            prompt,
            self.privilege_manager.current_name()
        );

        self.execute_on_open_commands().await
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(Connection { transport, channel }) = self.connection.take() {
            if let Err(e) = channel.close().await {
                debug!("channel close: {}", e);
            }
            transport.close().await?;
            debug!("{}: disconnected", self.ssh_config.target());
        }
        Ok(())
    }

    async fn send_command(&mut self, command: &str) -> Result<Response> {
        let start = Instant::now();

        self.channel()?.send(command).await?;
        let (raw_result, prompt) = self.read_until_prompt().await?;

        let elapsed = start.elapsed();
        let result = normalize_output(&raw_result, command);
        let failure = self.platform.detect_failure(&result).map(str::to_string);

        let response = Response::new(command, result, raw_result, prompt, elapsed);
        Ok(match failure {
            Some(pattern) => response.with_failure(pattern),
            None => response,
        })
    }

    async fn send_config(&mut self, commands: &[&str]) -> Result<String> {
        let mut session = self.config_session().await?;
        for cmd in commands {
            session.send_command(cmd).await?;
        }
        session.end().await
    }

    async fn acquire_privilege(&mut self, target: &str) -> Result<String> {
        let current = self
            .privilege_manager
            .current_name()
            .unwrap_or_default()
            .to_string();

        if current == target {
            return Ok(String::new());
        }

        let path = self.privilege_manager.find_path(&current, target)?;
        let mut transcript = String::new();

        for step in path.windows(2) {
            let (from, to) = (&step[0], &step[1]);

            let transition = self.privilege_manager.get_transition(from, to).ok_or_else(|| {
                DriverError::NoPrivilegePath {
                    from: from.clone(),
                    to: to.clone(),
                }
            })?;

            debug!("privilege {} -> {} via {:?}", from, to, transition.command);
            self.channel()?.send(&transition.command).await?;

            if let Some(ref password_prompt) = transition.password_prompt {
                let timeout = self.timeout;
                let password = self.ssh_config.auth.password().to_string();
                let channel = self.channel()?;
                let challenge = channel.read_until_pattern(password_prompt, timeout).await?;
                transcript.push_str(&String::from_utf8_lossy(&challenge));
                channel.send(&password).await?;
            }

            let (output, _) = self.read_until_prompt().await?;
            transcript.push_str(&output);

            if self.privilege_manager.current_name() != Some(to.as_str()) {
                return Err(DriverError::PrivilegeAcquisitionFailed { target: to.clone() }.into());
            }
        }

        Ok(transcript)
    }

    fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    fn is_alive(&self) -> bool {
        self.connection
            .as_ref()
            .is_some_and(|c| c.transport.is_alive())
    }

    fn current_privilege(&self) -> Option<&str> {
        self.privilege_manager.current_name()
    }
}
