pub mod config;
pub mod repl;
pub mod run;

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use zhimpa_application::{Activation, Collaborators, Dispatcher, Outcome, Status};
use zhimpa_core::clock::SystemClock;
use zhimpa_core::config::SiteConfig;
use zhimpa_core::notice::NoticeLevel;
use zhimpa_infrastructure::{HistoryNavigator, QueueNotifier, open_store};

/// A dispatcher wired to terminal collaborators.
pub struct Site {
    pub dispatcher: Dispatcher,
    notifier: Arc<QueueNotifier>,
}

impl Site {
    pub fn open(config: SiteConfig) -> Result<Self> {
        let store = open_store(&config.storage)?;
        let notifier = Arc::new(QueueNotifier::new());

        let dispatcher = Dispatcher::new(
            config,
            Collaborators {
                store,
                navigator: Arc::new(HistoryNavigator::new()),
                notifier: notifier.clone(),
                clock: Arc::new(SystemClock),
            },
        );
        Ok(Self {
            dispatcher,
            notifier,
        })
    }

    /// Prints queued notices, then follows navigation to its end.
    pub fn settle(&mut self) -> Result<()> {
        self.print_notices();
        if let Some(activation) = self.dispatcher.follow_navigation()? {
            print_activation(&self.dispatcher, &activation);
        }
        Ok(())
    }

    pub fn print_notices(&self) {
        for notice in self.notifier.drain() {
            match notice.level {
                NoticeLevel::Info => println!("{}", format!("[notice] {}", notice).bright_green()),
                NoticeLevel::Error => println!("{}", format!("[notice] {}", notice).red()),
            }
        }
    }
}

pub fn print_activation(dispatcher: &Dispatcher, activation: &Activation) {
    let page = &dispatcher.view().page;
    let line = match activation {
        Activation::Redirected { to } => format!("{} -> redirect to {}", page, to),
        Activation::Anonymous => format!("{} (anonymous)", page),
        Activation::Authenticated { user } => format!("{} (signed in as {})", page, user),
    };
    println!("{}", line.bright_magenta());
}

pub fn print_outcome(outcome: &Outcome) {
    let line = match &outcome.status {
        Status::Applied => format!("{}: applied", outcome.command).green(),
        Status::Ignored => format!("{}: no handler on this page", outcome.command).bright_black(),
        Status::Rejected(e) => format!("{}: rejected ({})", outcome.command, e).yellow(),
    };
    println!("{}", line);
}
