//! Subcommand handlers.
//!
//! Each handler takes the payload text and writes its result through
//! [`Output`]. Progress and summaries go to the log on stderr.

use crate::{
    config::ToolConfig,
    editor::{Edit, EditorSession},
    io::{Output, read_input},
    log,
    siteframe::{self, Document, Patch, buttons},
};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::path::Path;

pub fn normalize(payload: &str, out: &Output) -> Result<()> {
    if siteframe::is_escaped(payload) {
        log!("normalize"; "escaped payload detected, unescaping");
    }
    out.text(&siteframe::normalize(payload))
}

pub fn parse(payload: &str, out: &Output) -> Result<()> {
    let doc = siteframe::parse(payload);
    log_counts("parse", &doc);
    out.json(&doc)
}

/// Canonicalize the payload. With `check`, only report whether it already is.
pub fn format(payload: &str, check: bool, config: &ToolConfig, out: &Output) -> Result<()> {
    let doc = siteframe::parse(payload);
    let formatted = serialize(&doc, config)?;

    if check {
        if formatted != payload.trim() {
            bail!("payload is not in canonical form");
        }
        log!("format"; "payload is canonical");
        return Ok(());
    }

    log_counts("format", &doc);
    out.text(&formatted)
}

/// Serialize a JSON document back into payload text.
pub fn render(json: &str, config: &ToolConfig, out: &Output) -> Result<()> {
    let doc: Document = serde_json::from_str(json).context("Input is not a siteframe document")?;
    out.text(&serialize(&doc, config)?)
}

pub fn edit(payload: &str, edits: &[Edit], config: &ToolConfig, out: &Output) -> Result<()> {
    let mut session = EditorSession::new(Some(payload), config.editor.verify);
    for edit in edits {
        edit.apply(&mut session)
            .with_context(|| format!("Failed to apply {edit:?}"))?;
        log!("edit"; "{edit:?}");
    }
    save(&mut session, "edit", out)
}

/// Write the session's payload if an edit changed it.
fn save(session: &mut EditorSession, module: &str, out: &Output) -> Result<()> {
    if session.is_dirty() {
        out.text(session.raw())?;
        session.mark_saved();
        log!(module; "payload updated");
    }
    Ok(())
}

pub fn buttons(payload: &str, config: &ToolConfig, out: &Output) -> Result<()> {
    let copy = buttons::extract_all(payload, &config.buttons.tokens);
    let found = copy.values().filter(|value| value.is_some()).count();
    log!("buttons"; "{found} of {} tokens found", copy.len());
    out.json(&copy)
}

pub fn patch(
    payload: &str,
    search: Option<&str>,
    replace: Option<&str>,
    full: Option<&Path>,
    out: &Output,
) -> Result<()> {
    let patch = match (search, replace, full) {
        (Some(search), Some(replace), None) => Patch::Replace {
            search: search.to_owned(),
            replace: replace.to_owned(),
        },
        (None, None, Some(path)) => Patch::Full(read_input(path)?),
        _ => bail!("use either --search with --replace, or --full"),
    };

    let mut session = EditorSession::new(Some(payload), false);
    session.apply_patch(&patch)?;
    save(&mut session, "patch", out)
}

#[derive(Serialize)]
struct Stats<'a> {
    parts: usize,
    pages: usize,
    blocks: usize,
    home: Option<&'a str>,
}

pub fn stats(payload: &str, out: &Output) -> Result<()> {
    let doc = siteframe::parse(payload);
    let stats = Stats {
        parts: doc.parts.len(),
        pages: doc.pages.len(),
        blocks: doc.block_count(),
        home: doc.home_page().map(|page| page.slug().or(page.title()).unwrap_or(&page.id)),
    };
    log_counts("stats", &doc);
    out.json(&stats)
}

fn serialize(doc: &Document, config: &ToolConfig) -> Result<String> {
    if config.editor.verify {
        Ok(siteframe::serialize_verified(doc)?)
    } else {
        Ok(siteframe::serialize(doc))
    }
}

fn log_counts(module: &str, doc: &Document) {
    if doc.is_empty() {
        log!(module; "no siteframe parts or pages recognized");
        return;
    }
    log!(
        module;
        "{} parts, {} pages, {} blocks",
        doc.parts.len(),
        doc.pages.len(),
        doc.block_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PAYLOAD: &str = "<!--siteframe:part type=\"header\"-->\nHELLO\n<!--siteframe:/part-->";

    fn run<F>(config: &ToolConfig, f: F) -> String
    where
        F: FnOnce(&Output) -> Result<()>,
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out");
        f(&Output::new(Some(&path), config)).unwrap();
        fs::read_to_string(&path).unwrap()
    }

    #[test]
    fn test_format_canonicalizes() {
        let config = ToolConfig::default();
        let input = "<!--siteframe:part type=\"header\"-->HELLO<!--/siteframe:part-->";
        let out = run(&config, |out| format(input, false, &config, out));
        assert_eq!(out, format!("{PAYLOAD}\n"));
    }

    #[test]
    fn test_format_check() {
        let config = ToolConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out");
        let out = Output::new(Some(&path), &config);

        assert!(format(PAYLOAD, true, &config, &out).is_ok());
        assert!(format(&format!("{PAYLOAD}\n"), true, &config, &out).is_ok());
        assert!(format("<!--siteframe:part-->x<!--siteframe:/part-->", true, &config, &out).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_parse_then_render() {
        let config = ToolConfig::default();
        let json = run(&config, |out| parse(PAYLOAD, out));
        assert!(json.contains("\"type\": \"header\""));

        let text = run(&config, |out| render(&json, &config, out));
        assert_eq!(text.trim_end(), PAYLOAD);
    }

    #[test]
    fn test_render_rejects_non_document() {
        let config = ToolConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let out = Output::new(Some(dir.path()), &config);
        assert!(render("{\"parts\": 3}", &config, &out).is_err());
    }

    #[test]
    fn test_edit_applies_in_order() {
        let config = ToolConfig::default();
        let edits = [
            Edit::PartType {
                part: "part-0".into(),
                value: "footer".into(),
            },
            Edit::PartContent {
                part: "part-0".into(),
                value: "BYE".into(),
            },
        ];
        let out = run(&config, |out| edit(PAYLOAD, &edits, &config, out));
        assert_eq!(
            out,
            "<!--siteframe:part type=\"footer\"-->\nBYE\n<!--siteframe:/part-->\n"
        );
    }

    #[test]
    fn test_save_writes_only_dirty_sessions() {
        let config = ToolConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out");
        let out = Output::new(Some(&path), &config);

        let mut session = EditorSession::new(Some(PAYLOAD), true);
        save(&mut session, "edit", &out).unwrap();
        assert!(!path.exists());

        session.set_part_content("part-0", "BYE").unwrap();
        save(&mut session, "edit", &out).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("BYE"));
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_buttons_json() {
        let mut config = ToolConfig::default();
        config.output.pretty = false;
        let payload = "[login_btn text=\"Sign in\"]";
        let out = run(&config, |out| buttons(payload, &config, out));
        assert_eq!(
            out,
            "{\"login_btn\":\"Sign in\",\"register_btn\":null,\"bonus_btn\":null}\n"
        );
    }

    #[test]
    fn test_patch_replace() {
        let config = ToolConfig::default();
        let out = run(&config, |out| {
            patch(PAYLOAD, Some("HELLO"), Some("HI"), None, out)
        });
        assert!(out.contains("\nHI\n"));
    }

    #[test]
    fn test_stats() {
        let mut config = ToolConfig::default();
        config.output.pretty = false;
        let payload = "<!--siteframe:page title=\"Home\" slug=\"/\" home=\"true\"-->\
                       <!--siteframe:block-->a<!--siteframe:/block-->\
                       <!--siteframe:/page-->";
        let out = run(&config, |out| stats(payload, out));
        assert_eq!(out, "{\"parts\":0,\"pages\":1,\"blocks\":1,\"home\":\"/\"}\n");
    }
}
