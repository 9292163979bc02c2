//! Babel 6 plugin ecosystem table

use serde_json::{Map, Value};

use super::{PresetEntry, Registry, ValueType};
use super::ValueType::{Boolean, Object, String as Str, StringArray};

type Entry = (&'static str, &'static [(&'static str, bool)]);

#[rustfmt::skip]
static PLUGINS: &[&str] = &[
    "check-es2015-constants", "external-helpers", "syntax-async-functions",
    "syntax-async-generators", "syntax-class-constructor-call", "syntax-class-properties",
    "syntax-decorators", "syntax-do-expressions", "syntax-exponentiation-operator",
    "syntax-export-extensions", "syntax-flow", "syntax-function-bind", "syntax-function-sent",
    "syntax-jsx", "syntax-object-rest-spread", "syntax-trailing-function-commas",
    "transform-async-functions", "transform-async-to-generator",
    "transform-async-to-module-method", "transform-class-constructor-call",
    "transform-class-properties", "transform-decorators", "transform-do-expressions",
    "transform-es2015-arrow-functions", "transform-es2015-block-scoped-functions",
    "transform-es2015-block-scoping", "transform-es2015-classes",
    "transform-es2015-computed-properties", "transform-es2015-destructuring",
    "transform-es2015-duplicate-keys", "transform-es2015-for-of",
    "transform-es2015-function-name", "transform-es2015-instanceof",
    "transform-es2015-literals", "transform-es2015-modules-amd",
    "transform-es2015-modules-commonjs", "transform-es2015-modules-systemjs",
    "transform-es2015-modules-umd", "transform-es2015-object-super",
    "transform-es2015-parameters", "transform-es2015-shorthand-properties",
    "transform-es2015-spread", "transform-es2015-sticky-regex",
    "transform-es2015-template-literals", "transform-es2015-typeof-symbol",
    "transform-es2015-unicode-regex", "transform-es3-member-expression-literals",
    "transform-es3-property-literals", "transform-es5-property-mutators", "transform-eval",
    "transform-exponentiation-operator", "transform-export-extensions",
    "transform-flow-comments", "transform-flow-strip-types", "transform-function-bind",
    "transform-jscript", "transform-object-assign", "transform-object-rest-spread",
    "transform-object-set-prototype-of-to-assign", "transform-proto-to-assign",
    "transform-react-constant-elements", "transform-react-display-name",
    "transform-react-inline-elements", "transform-react-jsx-compat",
    "transform-react-jsx-self", "transform-react-jsx-source", "transform-react-jsx",
    "transform-regenerator", "transform-runtime", "transform-strict-mode",
    "undeclared-variables-check",
    // babili
    "minify-constant-folding", "minify-dead-code-elimination", "minify-empty-function",
    "minify-flip-comparisons", "minify-guarded-expressions", "minify-infinity",
    "minify-mangle-names", "minify-replace", "minify-simplify", "minify-type-constructors",
    "transform-inline-environment-variables", "transform-member-expression-literals",
    "transform-merge-sibling-variables", "transform-minify-booleans",
    "transform-node-env-inline", "transform-property-literals", "transform-remove-console",
    "transform-remove-debugger", "transform-simplify-comparison-operators",
    "transform-undefined-to-void",
    // third party
    "inferno", "lodash", "mjsx", "transform-symbol-member",
];

const ES2015: &[Entry] = &[
    ("transform-es2015-template-literals", &[]),
    ("transform-es2015-literals", &[]),
    ("transform-es2015-function-name", &[]),
    ("transform-es2015-arrow-functions", &[]),
    ("transform-es2015-block-scoped-functions", &[]),
    ("transform-es2015-classes", &[]),
    ("transform-es2015-object-super", &[]),
    ("transform-es2015-shorthand-properties", &[]),
    ("transform-es2015-duplicate-keys", &[]),
    ("transform-es2015-computed-properties", &[]),
    ("transform-es2015-for-of", &[]),
    ("transform-es2015-sticky-regex", &[]),
    ("transform-es2015-unicode-regex", &[]),
    ("check-es2015-constants", &[]),
    ("transform-es2015-spread", &[]),
    ("transform-es2015-parameters", &[]),
    ("transform-es2015-destructuring", &[]),
    ("transform-es2015-block-scoping", &[]),
    ("transform-es2015-typeof-symbol", &[]),
];

const REGENERATOR: &[Entry] = &[(
    "transform-regenerator",
    &[("async", false), ("asyncGenerators", false)],
)];

const ES2016: &[Entry] = &[("transform-exponentiation-operator", &[])];

const ES2017: &[Entry] = &[
    ("syntax-trailing-function-commas", &[]),
    ("transform-async-to-generator", &[]),
];

const STAGE_3: &[Entry] = &[
    ("syntax-trailing-function-commas", &[]),
    ("transform-async-to-generator", &[]),
    ("transform-exponentiation-operator", &[]),
    ("transform-object-rest-spread", &[]),
    ("transform-async-generator-functions", &[]),
];

const STAGE_1: &[Entry] = &[
    ("transform-class-constructor-call", &[]),
    ("transform-class-properties", &[]),
    ("transform-decorators", &[]),
    ("transform-export-extensions", &[]),
];

const STAGE_0: &[Entry] = &[
    ("transform-do-expressions", &[]),
    ("transform-function-bind", &[]),
];

const REACT: &[Entry] = &[
    ("syntax-flow", &[]),
    ("syntax-jsx", &[]),
    ("transform-flow-strip-types", &[]),
    ("transform-react-jsx", &[]),
    ("transform-react-display-name", &[]),
];

// https://github.com/facebook/react-native/tree/master/babel-preset
const REACT_NATIVE: &[Entry] = &[
    ("syntax-async-functions", &[]),
    ("syntax-class-properties", &[]),
    ("syntax-trailing-function-commas", &[]),
    ("transform-class-properties", &[]),
    ("transform-es2015-function-name", &[]),
    ("transform-es2015-arrow-functions", &[]),
    ("transform-es2015-block-scoping", &[]),
    ("transform-es2015-classes", &[]),
    ("transform-es2015-computed-properties", &[]),
    ("check-es2015-constants", &[]),
    ("transform-es2015-destructuring", &[]),
    (
        "transform-es2015-modules-commonjs",
        &[("strict", false), ("allowTopLevelThis", true)],
    ),
    ("transform-es2015-parameters", &[]),
    ("transform-es2015-shorthand-properties", &[]),
    ("transform-es2015-spread", &[]),
    ("transform-es2015-template-literals", &[]),
    ("transform-es2015-literals", &[]),
    ("transform-flow-strip-types", &[]),
    ("transform-object-assign", &[]),
    ("transform-object-rest-spread", &[]),
    ("transform-react-display-name", &[]),
    ("transform-react-jsx", &[]),
    ("transform-regenerator", &[]),
    ("transform-es2015-for-of", &[("loose", true)]),
    ("transform-symbol-member", &[]),
];

const BABILI: &[Entry] = &[
    ("minify-constant-folding", &[]),
    ("minify-dead-code-elimination", &[]),
    ("minify-flip-comparisons", &[]),
    ("minify-guarded-expressions", &[]),
    ("minify-infinity", &[]),
    ("minify-mangle-names", &[]),
    ("minify-replace", &[]),
    ("minify-simplify", &[]),
    ("minify-type-constructors", &[]),
    ("transform-member-expression-literals", &[]),
    ("transform-merge-sibling-variables", &[]),
    ("transform-minify-booleans", &[]),
    ("transform-property-literals", &[]),
    ("transform-simplify-comparison-operators", &[]),
    ("transform-undefined-to-void", &[]),
];

/// Presets as concatenations of the tables above
static PRESETS: &[(&str, &[&[Entry]])] = &[
    ("react", &[REACT]),
    ("react-native", &[REACT_NATIVE]),
    ("es2015", &[ES2015, REGENERATOR]),
    // as above but add helpers, remove common-js
    ("es2015-rollup", &[ES2015, REGENERATOR, &[("external-helpers", &[])]]),
    ("es2016", &[ES2016]),
    ("es2017", &[ES2017]),
    (
        "latest",
        &[
            ES2015,
            &[("transform-es2015-modules-commonjs", &[])],
            REGENERATOR,
            ES2016,
            ES2017,
        ],
    ),
    ("stage-3", &[STAGE_3]),
    ("stage-2", &[STAGE_3]),
    ("stage-1", &[STAGE_3, STAGE_1]),
    ("stage-0", &[STAGE_3, STAGE_1, STAGE_0]),
    ("babili", &[BABILI]),
];

const MODULE_OPTIONS: &[(&str, ValueType)] = &[
    ("allowTopLevelThis", Boolean),
    ("loose", Boolean),
    ("strict", Boolean),
    ("strictMode", Boolean),
];

#[rustfmt::skip]
static OPTIONS: &[(&str, &[(&str, ValueType)])] = &[
    ("transform-async-to-module-method", &[("module", Str), ("method", Str)]),
    ("transform-es2015-arrow-functions", &[("spec", Boolean)]),
    ("transform-es2015-classes", &[("loose", Boolean)]),
    ("transform-es2015-computed-properties", &[("loose", Boolean)]),
    ("transform-es2015-destructuring", &[("loose", Boolean)]),
    ("transform-es2015-for-of", &[("loose", Boolean)]),
    ("transform-es2015-modules-amd", MODULE_OPTIONS),
    ("transform-es2015-modules-commonjs", MODULE_OPTIONS),
    ("transform-es2015-modules-systemjs", &[("loose", Boolean), ("systemGlobal", Str)]),
    ("transform-es2015-modules-umd", &[
        ("globals", Object), ("exactGlobals", Boolean), ("allowTopLevelThis", Boolean),
        ("loose", Boolean), ("strict", Boolean), ("strictMode", Boolean),
    ]),
    ("transform-es2015-spread", &[("loose", Boolean)]),
    ("transform-es2015-template-literals", &[("loose", Boolean), ("spec", Boolean)]),
    ("transform-object-rest-spread", &[("useBuiltIns", Boolean)]),
    ("transform-react-jsx", &[("pragma", Str)]),
    ("transform-regenerator", &[("asyncGenerators", Boolean), ("generators", Boolean), ("async", Boolean)]),
    ("transform-runtime", &[("regenerator", Boolean), ("polyfill", Boolean)]),
    ("transform-strict-mode", &[("strict", Boolean), ("strictMode", Boolean)]),
    // babili
    ("minify-dead-code-elimination", &[("keepFnames", Boolean), ("optimizeRawSize", Boolean)]),
    ("minify-mangle-names", &[("blacklist", Object), ("eval", Boolean), ("keepFnames", Boolean)]),
    ("minify-replace", &[("replacements", Object)]),
    // third party
    ("lodash", &[("id", StringArray), ("cwd", Str)]),
];

fn preset_entry(&(name, config): &Entry) -> PresetEntry {
    if config.is_empty() {
        PresetEntry::Plugin(name.to_owned())
    } else {
        PresetEntry::Configured(
            name.to_owned(),
            config
                .iter()
                .map(|&(k, v)| (k.to_owned(), Value::Bool(v)))
                .collect::<Map<_, _>>(),
        )
    }
}

pub(super) fn registry() -> Registry {
    let mut registry = Registry::new();

    for plugin in PLUGINS {
        registry.add_plugin(*plugin);
    }

    for (name, parts) in PRESETS {
        registry.add_preset(
            *name,
            parts.iter().flat_map(|part| part.iter()).map(preset_entry),
        );
    }

    for (plugin, options) in OPTIONS {
        registry.add_plugin_options(*plugin, options.iter().copied());
    }

    // Decorators have to be applied before class properties are rewritten
    registry.add_order_rule("transform-class-properties", "transform-decorators");

    registry
}
