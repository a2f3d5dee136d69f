//! Aura bootstrap config: script environment, scraper and process-wide cache.

mod cache;
mod inline_shell;
mod scraper;
mod shell;

pub use cache::ConfigCache;
pub use inline_shell::InlineScriptShell;
pub use scraper::{AuraConfigScraper, APP_SHELL_PATH, MAX_RETRIES, RETRY_DELAY};
pub use shell::{AuraGlobal, GlobalObjectView, ScriptError, ScriptShell};
