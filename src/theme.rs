use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// Colours handed to every view model explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub scheme: ColorScheme,
    pub background: &'static str,
    pub text: &'static str,
    pub card_background: &'static str,
    pub card_border: &'static str,
    pub accent: &'static str,
}

const ACCENT: &str = "#8986f7";

impl Theme {
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self {
                scheme,
                background: "#ffffff",
                text: "#11181c",
                card_background: "#f2f2f7",
                card_border: "#555",
                accent: ACCENT,
            },
            ColorScheme::Dark => Self {
                scheme,
                background: "#151718",
                text: "#ecedee",
                card_background: "#2c2c2e",
                card_border: "#898",
                accent: ACCENT,
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_scheme(ColorScheme::default())
    }
}

/// Source of system colour-scheme changes.
pub struct Appearance {
    tx: watch::Sender<ColorScheme>,
}

impl Appearance {
    pub fn new(initial: ColorScheme) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn current(&self) -> ColorScheme {
        *self.tx.borrow()
    }

    pub fn theme(&self) -> Theme {
        Theme::for_scheme(self.current())
    }

    /// Publish a new scheme. Listeners are only woken on an actual change.
    pub fn set(&self, scheme: ColorScheme) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == scheme {
                false
            } else {
                *current = scheme;
                true
            }
        });
        if changed {
            tracing::debug!(?scheme, "color scheme changed");
        }
    }

    /// Invoke `on_change` with the new theme after every scheme change until
    /// the returned handle is dropped. Must be called inside a tokio runtime.
    pub fn subscribe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(Theme) + Send + 'static,
    {
        let mut rx = self.tx.subscribe();
        let task = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let scheme = *rx.borrow_and_update();
                on_change(Theme::for_scheme(scheme));
            }
        });
        Subscription { task }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}

/// Listener registration; dropping it unsubscribes.
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
