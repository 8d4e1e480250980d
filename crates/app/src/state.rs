//! Application state shared between the terminal loop and settle timers.
//!
//! `AppState` owns the session behind an async mutex. Every state change
//! bumps a revision counter on a `watch` channel so front-ends can redraw,
//! including when a settle timer fires while the user is idle.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};
use u_cook_core::{DishCatalog, Screen, SwipeDirection};

use crate::command::Command;
use crate::config::AppConfig;
use crate::error::{Result, add_breadcrumb, set_sentry_session};
use crate::screens;
use crate::session::{Session, SessionError, Snapshot, SwipeResolution};
use crate::swipe::{Settle, SettleTicket};

/// What the front-end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// State may have changed; draw the active screen.
    Redraw,
    /// Show text without redrawing.
    Message(String),
    /// End the session.
    Quit,
}

/// Result of dispatching one command.
#[derive(Debug)]
pub struct Dispatch {
    pub reply: Reply,
    /// Settle timer started by an accepted swipe.
    pub settle: Option<JoinHandle<()>>,
}

impl Dispatch {
    const fn reply(reply: Reply) -> Self {
        Self {
            reply,
            settle: None,
        }
    }

    /// Wait for the settle timer, if one was started.
    pub async fn settled(self) -> Reply {
        if let Some(handle) = self.settle
            && let Err(e) = handle.await
        {
            tracing::warn!(error = %e, "Settle task failed");
        }
        self.reply
    }
}

/// Shared application state.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    session: Mutex<Session>,
    revision: watch::Sender<u64>,
}

impl AppState {
    /// Create the state with a fresh session over `catalog`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty.
    pub fn new(config: AppConfig, catalog: Arc<dyn DishCatalog>) -> Result<Self> {
        let session = Session::new(catalog)?;
        set_sentry_session(&session.id());
        let (revision, _) = watch::channel(0);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                session: Mutex::new(session),
                revision,
            }),
        })
    }

    /// Subscribe to state revisions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// Current revision number.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.inner.revision.borrow()
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.inner.session.lock().await.snapshot()
    }

    pub async fn screen(&self) -> Screen {
        self.inner.session.lock().await.screen()
    }

    /// Render the active screen as text.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    pub async fn render(&self) -> Result<String> {
        let session = self.inner.session.lock().await;
        screens::render(&session)
    }

    /// Run `f` against the session and publish a new revision.
    pub async fn with_session<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        let result = {
            let mut session = self.inner.session.lock().await;
            f(&mut session)
        };
        self.bump();
        result
    }

    /// Resolve a swipe gesture and start its settle timer.
    ///
    /// A right swipe is in the cart when this returns. The card advances once
    /// the configured settle delay has elapsed.
    ///
    /// # Errors
    ///
    /// Returns an error outside the main screen.
    #[instrument(skip(self))]
    pub async fn swipe(&self, direction: SwipeDirection) -> Result<Option<JoinHandle<()>>> {
        let resolution = self.inner.session.lock().await.resolve_swipe(direction)?;

        match resolution {
            SwipeResolution::Accepted { ticket, added } => {
                if let Some(id) = added {
                    info!(dish_id = %id, "Dish liked");
                    add_breadcrumb("cart", "Dish liked", Some(&[("dish_id", id.as_str())]));
                }
                self.bump();
                Ok(Some(self.spawn_settle(ticket)))
            }
            SwipeResolution::Ignored => Ok(None),
        }
    }

    fn spawn_settle(&self, ticket: SettleTicket) -> JoinHandle<()> {
        let state = self.clone();
        let delay = self.inner.config.settle_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let settle = state.inner.session.lock().await.settle_swipe(ticket);
            if let Settle::Advanced(index) = settle {
                debug!(index, "Swipe settled");
                state.bump();
            }
        })
    }

    /// Dispatch a terminal command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is not available on the active screen
    /// or fails validation. The session is unchanged in that case, except
    /// that a rejected onboarding step keeps its field messages.
    #[instrument(skip(self, command), fields(command = %command))]
    pub async fn handle(&self, command: Command) -> Result<Dispatch> {
        match command {
            Command::Help => {
                let screen = self.screen().await;
                Ok(Dispatch::reply(Reply::Message(
                    Command::help(screen).to_string(),
                )))
            }
            Command::Snapshot => {
                let json = serde_json::to_string_pretty(&self.snapshot().await)?;
                Ok(Dispatch::reply(Reply::Message(json)))
            }
            Command::Quit => Ok(Dispatch::reply(Reply::Quit)),
            Command::Swipe(direction) => match self.swipe(direction).await? {
                Some(settle) => Ok(Dispatch {
                    reply: Reply::Redraw,
                    settle: Some(settle),
                }),
                None => Ok(Dispatch::reply(Reply::Message(
                    "Still settling, gesture ignored".to_string(),
                ))),
            },
            command => {
                let (from, to, result) = self
                    .with_session(|session| {
                        let from = session.screen();
                        let result = apply(session, command);
                        (from, session.screen(), result)
                    })
                    .await;
                if from != to {
                    let (from, to) = (from.to_string(), to.to_string());
                    info!(%from, %to, "Screen changed");
                    add_breadcrumb(
                        "navigation",
                        "Screen changed",
                        Some(&[("from", from.as_str()), ("to", to.as_str())]),
                    );
                }
                result?;
                Ok(Dispatch::reply(Reply::Redraw))
            }
        }
    }

    fn bump(&self) {
        self.inner.revision.send_modify(|revision| *revision += 1);
    }
}

/// Apply a session-mutating command.
fn apply(session: &mut Session, command: Command) -> std::result::Result<(), SessionError> {
    match command {
        Command::Name(name) => session.onboarding_mut()?.set_name(&name),
        Command::Phone(phone) => session.onboarding_mut()?.set_phone(&phone),
        Command::Cuisine(cuisine) => {
            session.onboarding_mut()?.toggle_cuisine(cuisine);
        }
        Command::Frequency(value) => session.onboarding_mut()?.set_frequency(value),
        Command::BudgetMin(value) => session.onboarding_mut()?.set_budget_min(value),
        Command::BudgetMax(value) => session.onboarding_mut()?.set_budget_max(value),
        Command::Next => {
            session.advance_onboarding()?;
        }
        Command::Open(screen) => {
            session.expect_screen(Screen::Main)?;
            session.navigate(screen);
        }
        Command::Filter(id) => {
            session.toggle_filter(&id)?;
        }
        Command::Chef(None) => session.show_current_chef()?,
        Command::Chef(Some(number)) => session.show_menu_chef(number)?,
        Command::Add(number) => {
            session.add_chef_dish(number)?;
        }
        Command::Remove(number) => {
            session.remove_cart_line(number)?;
        }
        Command::Back => match session.screen() {
            Screen::Menu | Screen::Chef | Screen::Cart => session.navigate(Screen::Main),
            actual => {
                return Err(SessionError::WrongScreen {
                    expected: Screen::Menu,
                    actual,
                });
            }
        },
        Command::Help | Command::Snapshot | Command::Quit | Command::Swipe(_) => {}
    }
    Ok(())
}
