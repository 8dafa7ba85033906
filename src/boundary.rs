// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Boundary extractor: given a classified comment and the tag's start/end
// patterns, finds where the license text itself begins and ends within the
// comment, plus any copyright notices immediately preceding it.

use regex::Regex;

/// The result of [`extract`]. Both fields are empty when no start line could
/// be found (`boundary-not-found`, an in-band result, not an
/// error).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub copyrights: Vec<String>,
    pub license: Vec<String>,
}

fn cruft_re() -> Regex {
    Regex::new(
        r"Derived from|Target configuration|[Cc]ontributed by|File:|File speex|Author:|[Vv]ersion|Written by|Linux for|You can look",
    )
    .unwrap()
}

/// Strips a common leading-rubbish prefix (whitespace, `*`, `#`, `-`, `/`)
/// captured from the first line, from every line. The prefix's last
/// character is optional on each line, so blank lines that dropped their
/// trailing padding still get stripped.
fn strip_common_prefix(lines: Vec<String>) -> Vec<String> {
    if lines.is_empty() {
        return lines;
    }
    let probe = Regex::new(r"^[\s*#\-/]+").unwrap();
    let Some(m) = probe.find(&lines[0]) else {
        return lines;
    };
    let rubbish = m.as_str();
    if rubbish.is_empty() {
        return lines;
    }

    let mut chars: Vec<char> = rubbish.chars().collect();
    let last = chars.pop().unwrap();
    let head: String = chars.into_iter().collect();
    let pattern = format!("^{}{}?", regex::escape(&head), regex::escape(&last.to_string()));
    let re = Regex::new(&pattern).unwrap();

    lines
        .into_iter()
        .map(|l| re.replacen(&l, 1, "").to_string())
        .collect()
}

/// Finds the license start line and any copyright lines immediately above
/// it, scanning forward. Stops at the first start-pattern match: copyrights
/// above a second, later license block in the same comment are not merged
/// in with the first.
fn find_start_and_copyrights(text: &[String], start_re: &Regex) -> (Option<usize>, Vec<String>) {
    let copyright_word = Regex::new(r"[Cc]opyright").unwrap();
    let copyright_symbol = Regex::new(r"[Cc]opyright ?[\d(©]").unwrap();
    let copyright_year = Regex::new(r"[Cc]opyright.{0,50}?\d{4}").unwrap();
    let blank = Regex::new(r"^\s*$").unwrap();
    let continuation = Regex::new(r"^\s*(\d{4}|©|\([Cc]\))").unwrap();
    let cruft = cruft_re();

    let mut copyrights: Vec<String> = Vec::new();
    let mut in_copyrights = false;
    let mut start_line = None;

    for (i, line) in text.iter().enumerate() {
        if start_re.is_match(line) {
            start_line = Some(i);
            break;
        }

        if copyright_word.is_match(line)
            && (copyright_symbol.is_match(line) || copyright_year.is_match(line))
        {
            copyrights.push(line.clone());
            in_copyrights = true;
            continue;
        }

        if in_copyrights {
            if blank.is_match(line) {
                in_copyrights = false;
            } else if continuation.is_match(line) {
                copyrights.push(format!("Copyright {}", line));
            } else if cruft.is_match(line) {
                in_copyrights = false;
            } else if let Some(last) = copyrights.last_mut() {
                last.push(' ');
                last.push_str(line);
            }
        }
    }

    (start_line, copyrights)
}

/// Finds the license end line, scanning backward from the end of `text`.
/// Prefers the match nearest `start_line` within `max_lines`; if every match
/// exceeds `max_lines`, falls back to the match closest to the start of the
/// file. If no end pattern matches at all, the license is taken to run to
/// the end of `text`.
fn find_end(text: &[String], start_line: usize, end_re: &Regex, max_lines: usize) -> usize {
    let mut end_line = None;
    for i in (0..text.len()).rev() {
        if end_re.is_match(&text[i]) {
            end_line = Some(i);
            let gap = i as isize - start_line as isize;
            if gap < max_lines as isize {
                break;
            }
        }
    }
    end_line.unwrap_or(text.len())
}

/// Extracts the license text and any preceding copyright notices from a
/// classified comment's lines. `start_re`/`end_re`/`max_lines` come from the
/// classifier rule that matched.
pub fn extract(text: &[String], start_re: &Regex, end_re: &Regex, max_lines: usize) -> Extraction {
    let (start_line, copyrights) = find_start_and_copyrights(text, start_re);

    let Some(start_line) = start_line else {
        return Extraction::default();
    };

    let end_line = find_end(text, start_line, end_re, max_lines);
    let end_exclusive = (end_line + 1).min(text.len());
    let license = text[start_line..end_exclusive].to_vec();

    Extraction {
        copyrights: strip_common_prefix(copyrights),
        license: strip_common_prefix(license),
    }
}
