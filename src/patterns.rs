// Context-aware identifier rewriting over raw text buffers.
//
// Deliberately regex-based rather than parser-based: the contexts are
// narrow and a full C++/Lua parser would be disproportionate here.
use crate::case::{convert_identifier, is_camel_case};
use regex::{Captures, Regex};

/// Rewrites quoted names inside C++ registration-table entries, e.g.
/// `{ "getWidth", w_getWidth }`. Only the string literal changes; the
/// companion function token is preserved verbatim.
pub struct RegistrationRewriter {
    entry: Regex,
}

impl RegistrationRewriter {
    pub fn new() -> Self {
        Self {
            entry: Regex::new(r#"\{\s*"((?:_)?[a-zA-Z][a-zA-Z0-9]*)"(\s*),\s*([a-zA-Z0-9_]+)\s*\}"#)
                .unwrap(),
        }
    }

    pub fn rewrite(&self, text: &str) -> String {
        self.entry
            .replace_all(text, |caps: &Captures| {
                let name = &caps[1];
                let separator = &caps[2];
                let companion = &caps[3];

                let check = name.strip_prefix('_').unwrap_or(name);
                if is_camel_case(check) {
                    format!(
                        "{{ \"{}\"{}, {} }}",
                        convert_identifier(name),
                        separator,
                        companion
                    )
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }
}

impl Default for RegistrationRewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrites camelCase call sites in Lua source: dotted module chains rooted
/// at `love`, flat `love_*` namespaces, their underscore-prefixed variants,
/// and `receiver:method` calls.
pub struct CallSiteRewriter {
    // Applied in order; each pass consumes the previous pass's output.
    dotted_passes: Vec<Regex>,
    method: Regex,
}

impl CallSiteRewriter {
    pub fn new() -> Self {
        let dotted_passes = vec![
            // love.module.functionName (any chain depth)
            Regex::new(r"(love(?:\.[a-zA-Z0-9_]+)+)\.([a-z][a-zA-Z0-9_]*)").unwrap(),
            // love_module.functionName
            Regex::new(r"(love_[a-zA-Z0-9_]+)\.([a-z][a-zA-Z0-9_]*)").unwrap(),
            // love.module._functionName
            Regex::new(r"(love(?:\.[a-zA-Z0-9_]+)+)\.(_[a-z][a-zA-Z0-9_]*)").unwrap(),
            // love_module._functionName
            Regex::new(r"(love_[a-zA-Z0-9_]+)\.(_[a-z][a-zA-Z0-9_]*)").unwrap(),
        ];

        Self {
            dotted_passes,
            // Permissive on purpose: any token:lowercaseToken occurrence.
            method: Regex::new(r"([a-zA-Z0-9_]+):([a-z][a-zA-Z0-9_]*)").unwrap(),
        }
    }

    pub fn rewrite(&self, text: &str) -> String {
        let mut buffer = text.to_string();

        for pass in &self.dotted_passes {
            buffer = pass
                .replace_all(&buffer, |caps: &Captures| {
                    let module_path = &caps[1];
                    let name = &caps[2];

                    let check = name.strip_prefix('_').unwrap_or(name);
                    if is_camel_case(check) {
                        format!("{}.{}", module_path, convert_identifier(name))
                    } else {
                        caps[0].to_string()
                    }
                })
                .into_owned();
        }

        self.method
            .replace_all(&buffer, |caps: &Captures| {
                let receiver = &caps[1];
                let method_name = &caps[2];

                if is_camel_case(method_name) {
                    format!("{}:{}", receiver, convert_identifier(method_name))
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }
}

impl Default for CallSiteRewriter {
    fn default() -> Self {
        Self::new()
    }
}
