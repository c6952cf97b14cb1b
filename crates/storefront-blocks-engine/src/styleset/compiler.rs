use std::sync::Arc;
use std::time::Duration;

use storefront_blocks_config::{Config, DEFAULT_NAMESPACE};

use super::cache::StylesetCache;
use super::definition::{StylesetDefinition, StylesetSource};
use super::minify::minify;
use super::variables::StylesetVariables;
use crate::shop::ShopId;

/// Token replaced by the namespace in reset and base rules.
pub const NAMESPACE_TOKEN: &str = "__NS__";

const RESET_RULES: &str = "\
.__NS__-block,
.__NS__-block *,
.__NS__-block *::before,
.__NS__-block *::after {
  box-sizing: border-box;
}

.__NS__-block img {
  display: block;
  max-width: 100%;
  height: auto;
}";

const FALLBACK_BASE_RULES: &str = "\
.__NS__-block {
  color: var(--__NS__-text-color);
  font-family: var(--__NS__-body-font-family);
  font-size: var(--__NS__-base-font-size);
  line-height: var(--__NS__-line-height);
  padding: var(--__NS__-section-spacing) var(--__NS__-spacing-unit);
}

.__NS__-block h1,
.__NS__-block h2,
.__NS__-block h3 {
  font-family: var(--__NS__-heading-font-family);
}

.__NS__-block a {
  color: var(--__NS__-primary-color);
}

.__NS__-container {
  max-width: var(--__NS__-container-width);
  margin: 0 auto;
}

.__NS__-narrow {
  max-width: var(--__NS__-narrow-width);
  margin: 0 auto;
}";

/// What `compile` puts into the stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub include_reset: bool,
    pub include_base_styles: bool,
    pub minify: bool,
    pub namespace: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            include_reset: false,
            include_base_styles: true,
            minify: false,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl CompileOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            include_reset: config.styleset.include_reset,
            include_base_styles: true,
            minify: config.styleset.minify,
            namespace: config.namespace.clone(),
        }
    }
}

/// A `:root` block declaring one `--<ns>-<name>` property per variable.
pub fn compile_variables(variables: &StylesetVariables, namespace: &str) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in variables.iter() {
        css.push_str(&format!("  --{namespace}-{name}: {value};\n"));
    }
    css.push('}');
    css
}

fn cache_key(shop_id: ShopId) -> String {
    format!("styleset_css_{shop_id}")
}

/// Builds per-shop stylesheets and keeps them in a `StylesetCache`.
pub struct StylesetCompiler {
    options: CompileOptions,
    ttl: Duration,
    base_rules: Option<String>,
    cache: Arc<dyn StylesetCache>,
    source: Arc<dyn StylesetSource>,
}

impl StylesetCompiler {
    /// The base-styles asset named in `config` is read once here; when it is
    /// missing or unreadable the inline rules are used instead.
    pub fn new(
        config: &Config,
        cache: Arc<dyn StylesetCache>,
        source: Arc<dyn StylesetSource>,
    ) -> Self {
        let base_rules = config
            .styleset
            .base_styles_path
            .as_ref()
            .and_then(|path| match std::fs::read_to_string(path) {
                Ok(css) => Some(css),
                Err(e) => {
                    log::warn!("Failed to read base styles at {}: {e}", path.display());
                    None
                }
            });

        Self {
            options: CompileOptions::from_config(config),
            ttl: Duration::from_secs(config.styleset.cache_ttl_secs),
            base_rules,
            cache,
            source,
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    fn base_rules(&self, namespace: &str) -> String {
        let template = self.base_rules.as_deref().unwrap_or(FALLBACK_BASE_RULES);
        template.trim().replace(NAMESPACE_TOKEN, namespace)
    }

    pub fn compile(&self, definition: &dyn StylesetDefinition, options: &CompileOptions) -> String {
        let ns = options.namespace.as_str();
        let mut parts = Vec::new();

        if options.include_reset {
            parts.push(RESET_RULES.replace(NAMESPACE_TOKEN, ns));
        }

        let variables = StylesetVariables::resolve(&definition.variables());
        parts.push(compile_variables(&variables, ns));

        if options.include_base_styles {
            parts.push(self.base_rules(ns));
        }

        let custom = definition.custom_css().trim();
        if !custom.is_empty() {
            parts.push(format!(
                "/* Custom CSS: {} */\n{custom}",
                definition.display_name()
            ));
        }

        let css = parts.join("\n\n");
        if options.minify { minify(&css) } else { css }
    }

    /// Defaults and base rules only, for shops without an active styleset.
    fn compile_fallback(&self) -> String {
        let ns = self.options.namespace.as_str();
        let css = format!(
            "{}\n\n{}",
            compile_variables(&StylesetVariables::defaults(), ns),
            self.base_rules(ns)
        );
        if self.options.minify { minify(&css) } else { css }
    }

    pub fn compiled_css_for_shop(&self, shop_id: ShopId, cached: bool) -> String {
        let key = cache_key(shop_id);
        if cached {
            if let Some(css) = self.cache.get(&key) {
                log::debug!("styleset cache hit for shop {shop_id}");
                return css;
            }
            log::debug!("styleset cache miss for shop {shop_id}");
        }

        let css = match self.source.active_styleset(shop_id) {
            Some(definition) => self.compile(definition.as_ref(), &self.options),
            None => {
                log::debug!("no active styleset for shop {shop_id}, using defaults");
                self.compile_fallback()
            }
        };

        if cached {
            self.cache.set(&key, css.clone(), self.ttl);
        }
        css
    }

    pub fn clear_cache(&self, shop_id: ShopId) {
        self.cache.delete(&cache_key(shop_id));
    }
}
