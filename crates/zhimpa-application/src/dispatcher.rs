//! Command dispatcher.
//!
//! Owns the live page and routes every command to its handler. Page loads
//! run session initialization and the access check before anything else
//! touches the view; handler errors are surfaced to the visitor as notices
//! here, in one place.

use std::sync::Arc;

use serde::Serialize;
use zhimpa_core::clock::Clock;
use zhimpa_core::config::SiteConfig;
use zhimpa_core::error::Result;
use zhimpa_core::navigation::Navigator;
use zhimpa_core::notice::{Notice, Notifier};
use zhimpa_core::page::{FormId, Page, PageView};
use zhimpa_core::session::{KeyValueStore, SessionStore};

use crate::command::{Command, Outcome, Status};
use crate::content_actions::ContentActions;
use crate::recipe_filter::RecipeFilter;
use crate::session_gate::SessionGate;
use crate::utility_forms::UtilityForms;

/// Upper bound on consecutive navigations followed in one go.
const MAX_NAVIGATION_HOPS: usize = 8;

/// External collaborators the dispatcher is wired to.
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn KeyValueStore>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
}

/// Result of activating a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Activation {
    /// The access check sent the visitor elsewhere; no view updates applied
    Redirected { to: Page },
    /// Anonymous visitor on a public page
    Anonymous,
    /// Authenticated visitor; the user menu shows `user`
    Authenticated { user: String },
}

/// Handler result before it becomes an [`Outcome`].
enum Handled {
    Applied { form_reset: bool },
    Ignored,
}

impl Handled {
    const APPLIED: Handled = Handled::Applied { form_reset: false };
    const RESET: Handled = Handled::Applied { form_reset: true };
}

pub struct Dispatcher {
    config: SiteConfig,
    gate: SessionGate,
    actions: ContentActions,
    forms: UtilityForms,
    filter: RecipeFilter,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    view: PageView,
}

impl Dispatcher {
    /// Wires the handlers. No page is loaded until [`Dispatcher::load`].
    pub fn new(config: SiteConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            store,
            navigator,
            notifier,
            clock,
        } = collaborators;

        let gate = SessionGate::new(SessionStore::new(store), navigator.clone());
        let actions = ContentActions::new(
            gate.clone(),
            notifier.clone(),
            clock.clone(),
            config.content.clone(),
        );
        let forms = UtilityForms::new(notifier.clone());

        Self {
            view: PageView::new(Page::HOME),
            config,
            gate,
            actions,
            forms,
            filter: RecipeFilter::new(),
            navigator,
            notifier,
            clock,
        }
    }

    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Loads `page` as a fresh document.
    ///
    /// Clears the session first when `session.clear_on_load` is set, then
    /// rebuilds the view, dropping every item posted on the previous page.
    pub fn load(&mut self, page: Page) -> Result<Activation> {
        tracing::info!("[Dispatcher] Loading {}", page);

        if self.config.session.clear_on_load {
            self.gate.initialize()?;
        }

        self.view = PageView::new(page)
            .with_recipes(self.config.catalog.cards())
            .with_discussion_placeholder(&self.config.content.empty_discussion_notice);

        Ok(self.activate())
    }

    /// Runs the access check for the current page, then applies the
    /// authenticated header if the visitor stays.
    pub fn activate(&mut self) -> Activation {
        let decision = self.gate.enforce(&self.view.page);
        self.view.footer_year = Some(self.clock.current_year());

        if let Some(to) = decision.redirect {
            return Activation::Redirected { to };
        }
        if !decision.authenticated {
            self.view.user_menu = None;
            self.view.auth_buttons_visible = true;
            return Activation::Anonymous;
        }

        let user = self.gate.current_user().display_name().to_string();
        self.view.user_menu = Some(user.clone());
        self.view.auth_buttons_visible = false;
        Activation::Authenticated { user }
    }

    /// Loads pending navigation targets until none is left.
    ///
    /// Returns the activation of the last page loaded, if any.
    pub fn follow_navigation(&mut self) -> Result<Option<Activation>> {
        let mut last = None;
        for _ in 0..MAX_NAVIGATION_HOPS {
            let Some(target) = self.navigator.take_pending() else {
                return Ok(last);
            };
            last = Some(self.load(target)?);
        }

        tracing::warn!(
            "[Dispatcher] Stopped following navigation after {} hops",
            MAX_NAVIGATION_HOPS
        );
        Ok(last)
    }

    /// Routes one command to its handler.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        let name = command.name();
        let prevents_default = command.prevents_default();
        tracing::debug!("[Dispatcher] {} on {}", name, self.view.page);

        let result = self.route(command);
        self.finish(name, prevents_default, result)
    }

    fn route(&mut self, command: Command) -> Result<Handled> {
        let layout = self.view.layout().clone();

        match command {
            Command::Open { page } => {
                self.load(page)?;
                Ok(Handled::APPLIED)
            }
            Command::Activate => {
                self.activate();
                Ok(Handled::APPLIED)
            }
            Command::Login(credentials) => {
                if !layout.has_form(FormId::Login) {
                    return Ok(Handled::Ignored);
                }
                self.gate.login(&credentials.email, &credentials.password)?;
                self.notifier.notify(Notice::info("Login successful!"));
                Ok(Handled::APPLIED)
            }
            Command::Signup(registration) => {
                if !layout.has_form(FormId::Signup) {
                    return Ok(Handled::Ignored);
                }
                let user = self.gate.signup(
                    &registration.name,
                    &registration.email,
                    &registration.password,
                    &registration.confirm_password,
                )?;
                self.notifier
                    .notify(Notice::info(format!("Account created for {}!", user.name)));
                Ok(Handled::APPLIED)
            }
            Command::Logout => {
                self.gate.logout()?;
                Ok(Handled::APPLIED)
            }
            Command::SubmitReview(form) => {
                if !layout.has_form(FormId::Review) {
                    return Ok(Handled::Ignored);
                }
                self.actions.submit_review(&mut self.view, &form)?;
                Ok(Handled::RESET)
            }
            Command::PostMessage(form) => {
                if !layout.has_form(FormId::Discussion) {
                    return Ok(Handled::Ignored);
                }
                self.actions.post_message(&mut self.view, &form)?;
                Ok(Handled::RESET)
            }
            Command::ShareRecipe(form) => {
                if !layout.has_form(FormId::ShareRecipe) {
                    return Ok(Handled::Ignored);
                }
                self.actions.share_recipe(&self.view, &form)?;
                Ok(Handled::RESET)
            }
            Command::SaveRecipe => {
                self.actions.save_recipe(&self.view)?;
                Ok(Handled::APPLIED)
            }
            Command::FilterRecipes { key } => {
                if !layout.recipe_grid {
                    return Ok(Handled::Ignored);
                }
                self.filter.apply(&mut self.view, &key)?;
                Ok(Handled::APPLIED)
            }
            Command::Subscribe(form) => {
                let acknowledged = self.forms.subscribe(&form);
                Ok(Handled::Applied {
                    form_reset: acknowledged,
                })
            }
            Command::Contact(form) => {
                if !layout.has_form(FormId::Contact) {
                    return Ok(Handled::Ignored);
                }
                self.forms.contact(&form)?;
                Ok(Handled::RESET)
            }
        }
    }

    fn finish(&self, name: &'static str, prevents_default: bool, result: Result<Handled>) -> Outcome {
        match result {
            Ok(Handled::Applied { form_reset }) => Outcome {
                command: name,
                status: Status::Applied,
                default_prevented: prevents_default,
                form_reset,
            },
            Ok(Handled::Ignored) => {
                tracing::debug!("[Dispatcher] No {} handler on {}", name, self.view.page);
                Outcome {
                    command: name,
                    status: Status::Ignored,
                    default_prevented: false,
                    form_reset: false,
                }
            }
            Err(e) => {
                // A failed guard has already redirected; that is the signal
                if !e.is_authorization() {
                    if !e.is_user_facing() {
                        tracing::warn!("[Dispatcher] {} failed: {}", name, e);
                    }
                    self.notifier.notify(Notice::error(e.to_string()));
                }
                Outcome {
                    command: name,
                    status: Status::Rejected(e),
                    default_prevented: prevents_default,
                    form_reset: false,
                }
            }
        }
    }
}
