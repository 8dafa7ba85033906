// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Compiled-in default syntax table, analogous to a `DEFAULT_CONFIG` YAML
// constant, but expressed as a builder since the comment syntax rules are
// nested data rather than free text.

use super::{DelimiterSet, SyntaxTable};

fn hash() -> Vec<DelimiterSet> {
    vec![DelimiterSet::Line("#".into())]
}

fn slashslash() -> Vec<DelimiterSet> {
    vec![DelimiterSet::Line("//".into())]
}

fn c_block() -> Vec<DelimiterSet> {
    vec![DelimiterSet::Block {
        open: "/*".into(),
        cont: "*".into(),
        close: "*/".into(),
    }]
}

fn html_block() -> Vec<DelimiterSet> {
    vec![DelimiterSet::Block {
        open: "<!--".into(),
        cont: "".into(),
        close: "-->".into(),
    }]
}

fn dnl() -> Vec<DelimiterSet> {
    vec![DelimiterSet::Line("dnl".into())]
}

fn semicolon() -> Vec<DelimiterSet> {
    vec![DelimiterSet::Line(";".into())]
}

fn whole_file() -> Vec<DelimiterSet> {
    vec![DelimiterSet::whole_file()]
}

/// A file type may admit several comment conventions; all candidates are
/// tried in order by the orchestrator. `.js` accepts
/// block comments, `//`, and (for hashbang'd scripts) `#`.
fn js_like() -> Vec<DelimiterSet> {
    let mut v = c_block();
    v.extend(slashslash());
    v.extend(hash());
    v
}

pub fn default_table() -> SyntaxTable {
    SyntaxTable::new()
        .with_strip_ext(".in")
        .with_strip_ext(".dist")
        .with_strip_ext(".sample")
        .with_strip_ext(".example")
        // exact filenames
        .with_filename("Makefile", hash())
        .with_filename("makefile", hash())
        .with_filename("GNUmakefile", hash())
        .with_filename("Dockerfile", hash())
        .with_filename("CMakeLists.txt", hash())
        .with_filename("Gemfile", hash())
        .with_filename("Rakefile", hash())
        .with_filename("Vagrantfile", hash())
        .with_filename(".gitignore", hash())
        .with_filename(".gitattributes", hash())
        // extensions
        .with_ext(".c", c_block())
        .with_ext(".h", c_block())
        .with_ext(".cc", c_block())
        .with_ext(".cpp", c_block())
        .with_ext(".cxx", c_block())
        .with_ext(".hpp", c_block())
        .with_ext(".hh", c_block())
        .with_ext(".m", c_block())
        .with_ext(".mm", c_block())
        .with_ext(".java", {
            let mut v = c_block();
            v.extend(slashslash());
            v
        })
        .with_ext(".cs", c_block())
        .with_ext(".go", slashslash())
        .with_ext(".rs", slashslash())
        .with_ext(".swift", slashslash())
        .with_ext(".kt", slashslash())
        .with_ext(".scala", slashslash())
        .with_ext(".js", js_like())
        .with_ext(".jsx", js_like())
        .with_ext(".ts", js_like())
        .with_ext(".tsx", js_like())
        .with_ext(".mjs", js_like())
        .with_ext(".css", c_block())
        .with_ext(".scss", {
            let mut v = c_block();
            v.extend(slashslash());
            v
        })
        .with_ext(".py", hash())
        .with_ext(".rb", hash())
        .with_ext(".pl", hash())
        .with_ext(".pm", hash())
        .with_ext(".sh", hash())
        .with_ext(".bash", hash())
        .with_ext(".zsh", hash())
        .with_ext(".yml", hash())
        .with_ext(".yaml", hash())
        .with_ext(".toml", hash())
        .with_ext(".ini", semicolon())
        .with_ext(".cfg", hash())
        .with_ext(".spec", hash())
        .with_ext(".m4", dnl())
        .with_ext(".ac", dnl())
        .with_ext(".php", {
            let mut v = c_block();
            v.extend(slashslash());
            v.extend(hash());
            v
        })
        .with_ext(".html", html_block())
        .with_ext(".htm", html_block())
        .with_ext(".xml", html_block())
        .with_ext(".svg", html_block())
        .with_ext(".vue", html_block())
        .with_ext(".md", html_block())
        .with_ext(".tex", {
            vec![DelimiterSet::Line("%".into())]
        })
        .with_ext(".lua", {
            vec![DelimiterSet::Block {
                open: "--[[".into(),
                cont: "".into(),
                close: "]]".into(),
            }]
        })
        .with_ext(".sql", {
            let mut v = c_block();
            v.extend(vec![DelimiterSet::Line("--".into())]);
            v
        })
        .with_ext(".el", semicolon())
        .with_ext(".clj", semicolon())
        .with_ext(".erl", vec![DelimiterSet::Line("%".into())])
        .with_ext(".f", vec![DelimiterSet::Line("!".into())])
        .with_ext(".f90", vec![DelimiterSet::Line("!".into())])
        .with_ext(".json", whole_file())
        .with_ext(".txt", whole_file())
        // stems
        .with_stem("configure", dnl())
        .with_stem("Doxyfile", hash())
        // shebangs, probed in order; first match wins
        .with_shebang("env node", c_block())
        .with_shebang("^#!", hash())
}
