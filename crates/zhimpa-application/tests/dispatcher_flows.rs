use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;
use zhimpa_application::{Activation, Collaborators, Command, Dispatcher, Status};
use zhimpa_core::clock::FixedClock;
use zhimpa_core::config::{SiteConfig, StorageBackend, StorageSettings};
use zhimpa_core::form::{
    ContactForm, Credentials, MessageForm, NewsletterForm, RecipeForm, Registration, ReviewForm,
};
use zhimpa_core::navigation::Navigator;
use zhimpa_core::notice::{Notice, NoticeLevel};
use zhimpa_core::page::Page;
use zhimpa_core::session::KeyValueStore;
use zhimpa_infrastructure::{HistoryNavigator, MemoryStore, QueueNotifier, open_store};

struct Site {
    dispatcher: Dispatcher,
    navigator: Arc<HistoryNavigator>,
    notifier: Arc<QueueNotifier>,
}

fn site_with(config: SiteConfig, store: Arc<dyn KeyValueStore>) -> Site {
    let navigator = Arc::new(HistoryNavigator::new());
    let notifier = Arc::new(QueueNotifier::new());
    let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());

    let dispatcher = Dispatcher::new(
        config,
        Collaborators {
            store,
            navigator: navigator.clone(),
            notifier: notifier.clone(),
            clock: Arc::new(clock),
        },
    );
    Site {
        dispatcher,
        navigator,
        notifier,
    }
}

fn site(clear_on_load: bool) -> Site {
    let mut config = SiteConfig::default();
    config.session.clear_on_load = clear_on_load;
    site_with(config, Arc::new(MemoryStore::new()))
}

/// A site with a session that survives page loads, logged in and sitting on `page`.
fn logged_in_on(page: Page) -> Site {
    let mut site = site(false);
    site.dispatcher.load(Page::Login).unwrap();
    site.dispatcher.dispatch(login("ama@example.com", "pw"));
    site.navigator.take_pending();
    site.notifier.drain();

    let activation = site.dispatcher.load(page).unwrap();
    assert_eq!(
        activation,
        Activation::Authenticated {
            user: "ama".to_string()
        }
    );
    site
}

fn login(email: &str, password: &str) -> Command {
    Command::Login(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

fn review(rating: Option<u8>) -> Command {
    Command::SubmitReview(ReviewForm {
        name: "Ama".to_string(),
        title: String::new(),
        rating,
        text: "Rich and fudgy.".to_string(),
    })
}

fn message(text: &str) -> Command {
    Command::PostMessage(MessageForm {
        name: "Kofi".to_string(),
        message: text.to_string(),
    })
}

#[test]
fn test_protected_page_load_redirects_to_login() {
    let mut site = site(true);

    let activation = site.dispatcher.load(Page::Index).unwrap();
    assert_eq!(activation, Activation::Redirected { to: Page::Login });
    // No authenticated header on a redirected load
    assert_eq!(site.dispatcher.view().user_menu, None);

    let followed = site.dispatcher.follow_navigation().unwrap();
    assert_eq!(followed, Some(Activation::Anonymous));
    assert_eq!(site.dispatcher.view().page, Page::Login);
    assert_eq!(site.navigator.history(), vec![Page::Login]);
}

#[test]
fn test_login_does_not_survive_navigation_when_cleared_on_load() {
    let mut site = site(true);
    site.dispatcher.load(Page::Login).unwrap();

    let outcome = site.dispatcher.dispatch(login("ama@example.com", "pw"));
    assert!(outcome.is_applied());
    assert!(outcome.default_prevented);
    assert!(!outcome.form_reset);
    assert_eq!(site.notifier.drain(), vec![Notice::info("Login successful!")]);

    // Home clears the session again and bounces back to login
    let followed = site.dispatcher.follow_navigation().unwrap();
    assert_eq!(followed, Some(Activation::Anonymous));
    assert_eq!(site.dispatcher.view().page, Page::Login);
    assert!(!site.dispatcher.gate().is_authenticated());
    assert_eq!(
        site.navigator.history(),
        vec![Page::Index, Page::Login]
    );
}

#[test]
fn test_login_lands_on_home_when_session_is_kept() {
    let mut site = site(false);
    site.dispatcher.load(Page::Login).unwrap();
    site.dispatcher.dispatch(login("ama@example.com", "pw"));

    let followed = site.dispatcher.follow_navigation().unwrap();
    assert_eq!(
        followed,
        Some(Activation::Authenticated {
            user: "ama".to_string()
        })
    );

    let view = site.dispatcher.view();
    assert_eq!(view.page, Page::Index);
    assert_eq!(view.user_menu.as_deref(), Some("ama"));
    assert!(!view.auth_buttons_visible);
    assert_eq!(view.footer_year, Some(2026));
}

#[test]
fn test_authenticated_visit_to_login_goes_home() {
    let mut site = logged_in_on(Page::Recipes);

    let activation = site.dispatcher.load(Page::Signup).unwrap();
    assert_eq!(activation, Activation::Redirected { to: Page::Index });
    assert_eq!(site.navigator.take_pending(), Some(Page::Index));
}

#[test]
fn test_review_while_unauthenticated_changes_nothing() {
    let mut site = site(false);
    site.dispatcher.load(Page::Recipe).unwrap();
    site.navigator.take_pending();

    let outcome = site.dispatcher.dispatch(review(Some(4)));

    assert!(outcome.error().unwrap().is_authorization());
    assert!(outcome.default_prevented);
    assert!(site.dispatcher.view().reviews.as_ref().unwrap().is_empty());
    // The redirect is the only feedback
    assert!(site.notifier.drain().is_empty());
    assert_eq!(site.navigator.take_pending(), Some(Page::Login));
}

#[test]
fn test_rejected_gated_submissions_still_prevent_default() {
    let mut site = site(false);

    site.dispatcher.load(Page::Discussion).unwrap();
    site.navigator.take_pending();
    let outcome = site.dispatcher.dispatch(message("Anyone here?"));
    assert!(outcome.error().unwrap().is_authorization());
    assert!(outcome.default_prevented);
    assert!(!outcome.form_reset);
    let discussion = site.dispatcher.view().discussion.as_ref().unwrap();
    assert!(discussion.is_empty());
    assert!(discussion.placeholder().is_some());

    site.dispatcher.load(Page::Share).unwrap();
    site.navigator.take_pending();
    let outcome = site.dispatcher.dispatch(Command::ShareRecipe(RecipeForm {
        title: "Kelewele".to_string(),
        ..RecipeForm::default()
    }));
    assert!(outcome.error().unwrap().is_authorization());
    assert!(outcome.default_prevented);
    assert!(!outcome.form_reset);

    assert!(site.notifier.drain().is_empty());
}

#[test]
fn test_review_flow() {
    let mut site = logged_in_on(Page::Recipe);

    let outcome = site.dispatcher.dispatch(review(Some(4)));
    assert!(outcome.is_applied());
    assert!(outcome.form_reset);

    let reviews = site.dispatcher.view().reviews.as_ref().unwrap();
    assert_eq!(reviews.len(), 1);
    let item = &reviews.items()[0];
    assert_eq!(item.stars().as_deref(), Some("★★★★☆"));
    assert_eq!(item.title.as_deref(), Some("Great recipe!"));
    assert_eq!(item.timestamp.to_string(), "2026-10-17");
    assert_eq!(
        site.notifier.drain(),
        vec![Notice::info("Thank you for your review!")]
    );
}

#[test]
fn test_review_without_rating_reports_and_keeps_form() {
    let mut site = logged_in_on(Page::Recipe);

    let outcome = site.dispatcher.dispatch(review(None));

    assert!(outcome.error().unwrap().is_missing_rating());
    assert!(!outcome.form_reset);
    assert!(site.dispatcher.view().reviews.as_ref().unwrap().is_empty());
    assert_eq!(
        site.notifier.drain(),
        vec![Notice::error("Please select a rating")]
    );
}

#[test]
fn test_discussion_placeholder_removed_once() {
    let mut site = logged_in_on(Page::Discussion);
    assert!(
        site.dispatcher
            .view()
            .discussion
            .as_ref()
            .unwrap()
            .placeholder()
            .is_some()
    );

    assert!(site.dispatcher.dispatch(message("First!")).is_applied());
    assert!(site.dispatcher.dispatch(message("Second")).is_applied());

    let discussion = site.dispatcher.view().discussion.as_ref().unwrap();
    assert!(discussion.placeholder().is_none());
    let bodies: Vec<_> = discussion.items().iter().map(|i| i.body.as_str()).collect();
    assert_eq!(bodies, ["Second", "First!"]);
}

#[test]
fn test_reload_drops_posted_content() {
    let mut site = logged_in_on(Page::Discussion);
    site.dispatcher.dispatch(message("Gone after reload"));

    site.dispatcher
        .dispatch(Command::Open {
            page: Page::Discussion,
        });

    let discussion = site.dispatcher.view().discussion.as_ref().unwrap();
    assert!(discussion.is_empty());
    assert_eq!(
        discussion.placeholder(),
        Some("No messages yet. Start the conversation!")
    );
}

#[test]
fn test_filter_flow() {
    let mut site = logged_in_on(Page::Recipes);

    let outcome = site.dispatcher.dispatch(Command::FilterRecipes {
        key: "dessert".to_string(),
    });
    assert!(outcome.is_applied());
    assert!(!outcome.default_prevented);

    let view = site.dispatcher.view();
    let visible: Vec<_> = view.visible_cards().map(|c| c.title.as_str()).collect();
    assert_eq!(visible, ["Chocolate Lava Cake", "Puff Puff"]);
    let active: Vec<_> = view.active_filters().map(|b| b.key.to_string()).collect();
    assert_eq!(active, ["dessert"]);

    site.dispatcher.dispatch(Command::FilterRecipes {
        key: "all".to_string(),
    });
    assert_eq!(site.dispatcher.view().visible_cards().count(), 6);
}

#[test]
fn test_unknown_filter_leaves_grid_untouched() {
    let mut site = logged_in_on(Page::Index);
    site.dispatcher.dispatch(Command::FilterRecipes {
        key: "main".to_string(),
    });

    let outcome = site.dispatcher.dispatch(Command::FilterRecipes {
        key: "soup".to_string(),
    });

    assert!(outcome.error().unwrap().is_not_found());
    let active: Vec<_> = site
        .dispatcher
        .view()
        .active_filters()
        .map(|b| b.key.to_string())
        .collect();
    assert_eq!(active, ["main"]);
    assert_eq!(site.dispatcher.view().visible_cards().count(), 2);
}

#[test]
fn test_commands_without_handler_on_page_are_ignored() {
    let mut site = site(true);
    site.dispatcher.load(Page::Login).unwrap();

    for command in [
        review(Some(5)),
        message("hello"),
        Command::FilterRecipes {
            key: "all".to_string(),
        },
        Command::Contact(ContactForm::default()),
    ] {
        let outcome = site.dispatcher.dispatch(command);
        assert!(outcome.is_ignored(), "{:?}", outcome);
        assert!(!outcome.default_prevented);
    }
    assert!(site.notifier.drain().is_empty());
    assert!(site.navigator.history().is_empty());
}

#[test]
fn test_signup_mismatch_is_reported() {
    let mut site = site(true);
    site.dispatcher.load(Page::Signup).unwrap();

    let outcome = site.dispatcher.dispatch(Command::Signup(Registration {
        name: "Efua".to_string(),
        email: "efua@example.com".to_string(),
        password: "p1".to_string(),
        confirm_password: "p2".to_string(),
    }));

    assert!(outcome.error().unwrap().is_validation());
    let notices = site.notifier.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Passwords do not match");
    assert!(site.navigator.history().is_empty());
}

#[test]
fn test_logout_flow() {
    let mut site = logged_in_on(Page::About);

    let outcome = site.dispatcher.dispatch(Command::Logout);
    assert!(outcome.is_applied());
    assert!(!outcome.default_prevented);

    let followed = site.dispatcher.follow_navigation().unwrap();
    assert_eq!(followed, Some(Activation::Anonymous));
    assert_eq!(site.dispatcher.view().page, Page::Login);
    assert!(site.dispatcher.view().auth_buttons_visible);
}

#[test]
fn test_subscribe_on_any_page() {
    let mut site = site(true);
    site.dispatcher.load(Page::Login).unwrap();

    let empty = site
        .dispatcher
        .dispatch(Command::Subscribe(NewsletterForm::default()));
    assert!(empty.is_applied());
    assert!(!empty.form_reset);
    assert!(site.notifier.drain().is_empty());

    let subscribed = site.dispatcher.dispatch(Command::Subscribe(NewsletterForm {
        email: "x@y.com".to_string(),
    }));
    assert!(subscribed.form_reset);
    assert_eq!(
        site.notifier.drain(),
        vec![Notice::info("Thank you for subscribing with x@y.com!")]
    );
}

#[test]
fn test_outcome_serializes_flat() {
    let mut site = logged_in_on(Page::Recipes);
    let outcome = site.dispatcher.dispatch(Command::FilterRecipes {
        key: "breakfast".to_string(),
    });

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["command"], "filter_recipes");
    assert_eq!(json["status"], "applied");
    assert_eq!(json["default_prevented"], false);
    assert!(json.get("error").is_none());

    let rejected = site.dispatcher.dispatch(Command::FilterRecipes {
        key: "soup".to_string(),
    });
    let json = serde_json::to_value(&rejected).unwrap();
    assert_eq!(json["status"], "rejected");
    assert!(json["error"].is_object());
    assert!(matches!(rejected.status, Status::Rejected(_)));
}

#[test]
fn test_file_session_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = SiteConfig::default();
    config.session.clear_on_load = false;
    config.storage = StorageSettings {
        backend: StorageBackend::File,
        path: Some(temp_dir.path().join("session.json")),
    };

    let mut first = site_with(config.clone(), open_store(&config.storage).unwrap());
    first.dispatcher.load(Page::Login).unwrap();
    first.dispatcher.dispatch(login("kwame@example.com", "pw"));

    let mut second = site_with(config.clone(), open_store(&config.storage).unwrap());
    let activation = second.dispatcher.load(Page::Index).unwrap();
    assert_eq!(
        activation,
        Activation::Authenticated {
            user: "kwame".to_string()
        }
    );
}
