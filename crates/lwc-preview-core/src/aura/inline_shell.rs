//! Targeted script environment for the org application shell.
//!
//! Instead of a general JavaScript engine this runs the shell's `<script>`
//! elements in document order and interprets the two bootstrap statements
//! the scraper cares about: the definition of `window.Aura` and the
//! assignment of a literal object to `Aura.initConfig`. Everything else in
//! a script is ignored.

use parking_lot::RwLock;
use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use url::Url;

use super::shell::{AuraGlobal, GlobalObjectView, ScriptError, ScriptShell};
use crate::org::ResourceLoader;

static SCRIPT_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static SRC_ATTR_REGEX: OnceLock<Regex> = OnceLock::new();
static TYPE_ATTR_REGEX: OnceLock<Regex> = OnceLock::new();
static AURA_DEFINE_REGEX: OnceLock<Regex> = OnceLock::new();
static INIT_CONFIG_REGEX: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used, reason = "static regex literal")]
fn script_tag_regex() -> &'static Regex {
    SCRIPT_TAG_REGEX.get_or_init(|| {
        Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").expect("Script tag regex is valid")
    })
}

#[allow(clippy::expect_used, reason = "static regex literal")]
fn src_attr_regex() -> &'static Regex {
    SRC_ATTR_REGEX.get_or_init(|| {
        Regex::new(r#"(?i)\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+))"#)
            .expect("Src attribute regex is valid")
    })
}

#[allow(clippy::expect_used, reason = "static regex literal")]
fn type_attr_regex() -> &'static Regex {
    TYPE_ATTR_REGEX.get_or_init(|| {
        Regex::new(r#"(?i)\btype\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+))"#)
            .expect("Type attribute regex is valid")
    })
}

#[allow(clippy::expect_used, reason = "static regex literal")]
fn aura_define_regex() -> &'static Regex {
    AURA_DEFINE_REGEX.get_or_init(|| {
        Regex::new(
            r#"(?:\bwindow\s*\.\s*Aura|\bwindow\s*\[\s*["']Aura["']\s*\]|\b(?:var|let|const)\s+Aura)\s*=[^=]"#,
        )
        .expect("Aura definition regex is valid")
    })
}

#[allow(clippy::expect_used, reason = "static regex literal")]
fn init_config_regex() -> &'static Regex {
    INIT_CONFIG_REGEX.get_or_init(|| {
        Regex::new(r"\bAura\s*\.\s*initConfig\s*=\s*").expect("initConfig regex is valid")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScriptSource {
    Inline(String),
    External(String),
}

/// Script environment backed by [`collect_scripts`] + a statement interpreter.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineScriptShell;

impl ScriptShell for InlineScriptShell {
    fn load_and_run(
        &self,
        html: &str,
        document_url: &Url,
        loader: ResourceLoader,
    ) -> Arc<dyn GlobalObjectView> {
        let window = Arc::new(Window::default());
        let scripts = collect_scripts(html);
        tracing::debug!(count = scripts.len(), "Running application shell scripts");

        let task_window = Arc::clone(&window);
        let base = document_url.clone();
        tokio::spawn(async move {
            run_scripts(scripts, base, loader, task_window).await;
        });

        window
    }
}

#[derive(Default)]
struct Window {
    state: RwLock<WindowState>,
}

#[derive(Default)]
struct WindowState {
    aura_defined: bool,
    init_config: Option<Value>,
    error: Option<ScriptError>,
}

impl Window {
    fn evaluate(&self, script: &str) {
        match interpret(script) {
            Ok(effects) => {
                let mut state = self.state.write();
                state.aura_defined |= effects.defines_aura;
                if let Some(config) = effects.init_config {
                    state.aura_defined = true;
                    state.init_config = Some(config);
                }
            },
            Err(e) => self.fail(e),
        }
    }

    fn fail(&self, error: ScriptError) {
        self.state.write().error = Some(error);
    }
}

impl GlobalObjectView for Window {
    fn aura(&self) -> Result<Option<AuraGlobal>, ScriptError> {
        let state = self.state.read();
        if state.init_config.is_some() {
            return Ok(Some(AuraGlobal { init_config: state.init_config.clone() }));
        }
        if let Some(error) = &state.error {
            return Err(error.clone());
        }
        Ok(state.aura_defined.then(AuraGlobal::default))
    }
}

async fn run_scripts(
    scripts: Vec<ScriptSource>,
    base: Url,
    loader: ResourceLoader,
    window: Arc<Window>,
) {
    for script in scripts {
        match script {
            ScriptSource::Inline(code) => window.evaluate(&code),
            ScriptSource::External(src) => {
                let url = match base.join(&src) {
                    Ok(url) => url,
                    Err(e) => {
                        tracing::debug!(src = %src, error = %e, "Skipping script with invalid src");
                        continue;
                    },
                };
                match loader.fetch(url.as_str()).await {
                    Ok(Some(bytes)) => window.evaluate(&String::from_utf8_lossy(&bytes)),
                    Ok(None) => {},
                    Err(e) => {
                        tracing::warn!(path = url.path(), error = %e, "Bootstrap script failed to load");
                        window.fail(ScriptError::ResourceLoad {
                            url: url.path().to_string(),
                            message: e.to_string(),
                        });
                    },
                }
            },
        }
    }
}

/// `<script>` elements of `html` in document order, skipping non-JS types.
pub(crate) fn collect_scripts(html: &str) -> Vec<ScriptSource> {
    script_tag_regex()
        .captures_iter(html)
        .filter_map(|cap| {
            let attrs = cap.get(1).map_or("", |m| m.as_str());
            let body = cap.get(2).map_or("", |m| m.as_str());

            if let Some(kind) = attr_value(type_attr_regex(), attrs) {
                if !is_javascript_type(&kind) {
                    return None;
                }
            }

            match attr_value(src_attr_regex(), attrs) {
                Some(src) => Some(ScriptSource::External(decode_entities(&src))),
                None if body.trim().is_empty() => None,
                None => Some(ScriptSource::Inline(body.to_string())),
            }
        })
        .collect()
}

fn attr_value(re: &Regex, attrs: &str) -> Option<String> {
    let cap = re.captures(attrs)?;
    (1..=3).find_map(|i| cap.get(i)).map(|m| m.as_str().to_string())
}

fn is_javascript_type(kind: &str) -> bool {
    matches!(
        kind.trim().to_ascii_lowercase().as_str(),
        "" | "text/javascript"
            | "application/javascript"
            | "text/ecmascript"
            | "application/ecmascript"
            | "module"
    )
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[derive(Debug, Default, PartialEq)]
struct ScriptEffects {
    defines_aura: bool,
    init_config: Option<Value>,
}

fn interpret(script: &str) -> Result<ScriptEffects, ScriptError> {
    let mut effects =
        ScriptEffects { defines_aura: aura_define_regex().is_match(script), init_config: None };

    for m in init_config_regex().find_iter(script) {
        let rest = &script[m.end()..];
        if !rest.starts_with('{') {
            continue;
        }
        let literal = object_literal(rest).ok_or_else(|| {
            ScriptError::Evaluation("unterminated Aura.initConfig object literal".to_string())
        })?;
        let value = serde_json::from_str(literal).map_err(|e| {
            ScriptError::Evaluation(format!("Aura.initConfig is not a JSON literal: {}", e))
        })?;
        effects.init_config = Some(value);
    }

    Ok(effects)
}

/// Balanced `{ ... }` prefix of `s`, honoring quoted strings.
fn object_literal(s: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut escaped = false;

    for (i, &b) in s.as_bytes().iter().enumerate() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'"' | b'\'' => quote = Some(b),
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return s.get(..=i);
                }
            },
            _ => {},
        }
    }
    None
}
