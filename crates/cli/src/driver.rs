use anyhow::{anyhow, bail, Context};
use idle_reaper_application::ports::AlarmScheduler;
use idle_reaper_domain::{ReaperEvent, TabId, TabStatus};
use idle_reaper_infrastructure::InMemoryTabRegistry;
use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::di::UseCases;

const BYTES_PER_MIB: u64 = 1024 * 1024;

const HELP: &str = "\
commands:
  open <url> [title]            open a background tab
  activate <id>                 focus a tab
  navigate <id> <url> [title]   load a new page in a tab
  close <id>                    close a tab
  discard <id>                  discard a tab now
  list                          list tabs
  stats                         estimated memory use
  settings                      show the active policy
  alarms                        show pending idle timers
  threshold <minutes>           set the inactivity threshold
  allow <domain>                add a domain to the whitelist
  deny <domain>                 remove a domain from the whitelist
  help                          show this text
  quit                          exit";

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open { url: String, title: Option<String> },
    Activate(TabId),
    Navigate { tab_id: TabId, url: String, title: Option<String> },
    Close(TabId),
    Discard(TabId),
    List,
    Stats,
    Settings,
    Alarms,
    Threshold(u32),
    Allow(String),
    Deny(String),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "open" => Command::Open {
                url: required(words.next(), "url")?,
                title: rest(words),
            },
            "activate" => Command::Activate(tab_id(words.next())?),
            "navigate" => Command::Navigate {
                tab_id: tab_id(words.next())?,
                url: required(words.next(), "url")?,
                title: rest(words),
            },
            "close" => Command::Close(tab_id(words.next())?),
            "discard" => Command::Discard(tab_id(words.next())?),
            "list" | "ls" => Command::List,
            "stats" => Command::Stats,
            "settings" => Command::Settings,
            "alarms" => Command::Alarms,
            "threshold" => {
                let minutes = required(words.next(), "minutes")?;
                Command::Threshold(
                    minutes
                        .parse()
                        .with_context(|| format!("invalid minutes: {}", minutes))?,
                )
            }
            "allow" => Command::Allow(required(words.next(), "domain")?),
            "deny" => Command::Deny(required(words.next(), "domain")?),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command: {} (try 'help')", other),
        };

        Ok(command)
    }
}

fn required(word: Option<&str>, what: &str) -> anyhow::Result<String> {
    word.map(str::to_string)
        .ok_or_else(|| anyhow!("missing {}", what))
}

fn tab_id(word: Option<&str>) -> anyhow::Result<TabId> {
    let raw = required(word, "tab id")?;
    raw.parse()
        .with_context(|| format!("invalid tab id: {}", raw))
}

fn rest<'a>(words: impl Iterator<Item = &'a str>) -> Option<String> {
    let title = words.collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}

/// Plays the browser: applies commands to the tab registry and reports what
/// changed on the event queue.
pub struct Driver {
    browser: Arc<InMemoryTabRegistry>,
    alarms: Arc<dyn AlarmScheduler>,
    events: UnboundedSender<ReaperEvent>,
    use_cases: Arc<UseCases>,
}

impl Driver {
    pub fn new(
        browser: Arc<InMemoryTabRegistry>,
        alarms: Arc<dyn AlarmScheduler>,
        events: UnboundedSender<ReaperEvent>,
        use_cases: Arc<UseCases>,
    ) -> Self {
        Self {
            browser,
            alarms,
            events,
            use_cases,
        }
    }

    /// Reads commands from stdin until `quit` or end of input.
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    println!("error: {:#}", e);
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }

            match self.execute(command).await {
                Ok(output) if !output.is_empty() => println!("{}", output),
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "Command failed");
                    println!("error: {:#}", e);
                }
            }
        }

        debug!("Command input closed");
        Ok(())
    }

    pub async fn execute(&self, command: Command) -> anyhow::Result<String> {
        match command {
            Command::Open { url, title } => {
                let tab = self.browser.open(&url, title.as_deref()).await;
                self.publish(ReaperEvent::TabUpdated {
                    tab_id: tab.id,
                    status: TabStatus::Complete,
                })?;
                Ok(format!("opened tab {}", tab.id))
            }
            Command::Activate(tab_id) => {
                self.browser.activate(tab_id).await?;
                self.publish(ReaperEvent::TabActivated(tab_id))?;
                Ok(String::new())
            }
            Command::Navigate { tab_id, url, title } => {
                self.browser.navigate(tab_id, &url, title.as_deref()).await?;
                self.publish(ReaperEvent::TabUpdated {
                    tab_id,
                    status: TabStatus::Loading,
                })?;
                self.publish(ReaperEvent::TabUpdated {
                    tab_id,
                    status: TabStatus::Complete,
                })?;
                Ok(String::new())
            }
            Command::Close(tab_id) => {
                self.browser.close(tab_id).await?;
                self.publish(ReaperEvent::TabRemoved(tab_id))?;
                Ok(String::new())
            }
            Command::Discard(tab_id) => {
                self.use_cases.discard_tab.execute(tab_id).await?;
                Ok(format!("discarded tab {}", tab_id))
            }
            Command::List => {
                let listings = self.use_cases.list_tabs.execute().await?;
                let mut out = String::new();
                for listing in listings {
                    let _ = writeln!(out, "{:>4}  {}", listing.id.get(), listing.label);
                }
                Ok(out.trim_end().to_string())
            }
            Command::Stats => {
                let stats = self.use_cases.memory_stats.execute().await?;
                Ok(format!(
                    "tabs: {} ({} discarded)\nestimated in use: {} MiB\nestimated saved: {} MiB",
                    stats.total_tabs,
                    stats.discarded_tabs,
                    stats.estimated_bytes_in_use / BYTES_PER_MIB,
                    stats.estimated_bytes_saved / BYTES_PER_MIB,
                ))
            }
            Command::Settings => {
                let config = self.use_cases.settings.current();
                let whitelist = config.whitelist.iter().cloned().collect::<Vec<_>>();
                Ok(format!(
                    "inactive time: {} min\nwhitelist: [{}]",
                    config.inactive_time_minutes,
                    whitelist.join(", ")
                ))
            }
            Command::Alarms => {
                let mut alarms = self.alarms.get_all().await?;
                alarms.sort_by_key(|a| a.scheduled_time);
                let mut out = String::new();
                for alarm in alarms {
                    let _ = writeln!(
                        out,
                        "{}  fires at {}",
                        alarm.name,
                        alarm.scheduled_time.format("%H:%M:%S")
                    );
                }
                Ok(out.trim_end().to_string())
            }
            Command::Threshold(minutes) => {
                self.use_cases.update_settings.set_inactive_time(minutes).await?;
                Ok(format!("inactive time set to {} min", minutes))
            }
            Command::Allow(domain) => {
                let added = self.use_cases.update_settings.add_to_whitelist(&domain).await?;
                Ok(if added {
                    format!("{} whitelisted", domain)
                } else {
                    format!("{} already whitelisted", domain)
                })
            }
            Command::Deny(domain) => {
                let removed = self
                    .use_cases
                    .update_settings
                    .remove_from_whitelist(&domain)
                    .await?;
                Ok(if removed {
                    format!("{} removed from whitelist", domain)
                } else {
                    format!("{} was not whitelisted", domain)
                })
            }
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => Ok(String::new()),
        }
    }

    fn publish(&self, event: ReaperEvent) -> anyhow::Result<()> {
        self.events
            .send(event)
            .map_err(|_| anyhow!("event queue closed"))
    }
}
