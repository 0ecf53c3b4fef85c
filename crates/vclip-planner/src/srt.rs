//! SRT reading and writing.

use vclip_models::timestamp::parse_timestamp;
use vclip_models::Cue;

use crate::error::{PlannerError, PlannerResult};

/// Render cues as an SRT document.
pub fn format_srt(cues: &[Cue]) -> String {
    let mut out = String::new();
    for cue in cues {
        out.push_str(&format!("{}\n{}\n{}\n\n", cue.index, cue.srt_timing(), cue.text));
    }
    out
}

/// Parse an SRT document.
///
/// Blank lines separate blocks. The numeric counter line is optional and
/// multi-line cue text is joined with spaces. Cues are renumbered from 1 in
/// document order.
pub fn parse_srt(input: &str) -> PlannerResult<Vec<Cue>> {
    let mut cues = Vec::new();
    let mut lines = input
        .trim_start_matches('\u{feff}')
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r').trim()))
        .peekable();

    loop {
        // Skip separators
        while lines.peek().is_some_and(|(_, l)| l.is_empty()) {
            lines.next();
        }

        let Some((line_no, first)) = lines.next() else {
            break;
        };

        let (timing_no, timing) = if first.contains("-->") {
            (line_no, first)
        } else if first.chars().all(|c| c.is_ascii_digit()) {
            lines
                .next()
                .ok_or_else(|| PlannerError::srt_parse(line_no, "cue counter without timing line"))?
        } else {
            return Err(PlannerError::srt_parse(line_no, format!("expected cue counter, got '{}'", first)));
        };

        let (start, end) = parse_timing(timing_no, timing)?;

        let mut text_lines = Vec::new();
        while let Some((_, l)) = lines.peek() {
            if l.is_empty() {
                break;
            }
            text_lines.push(*l);
            lines.next();
        }

        cues.push(Cue::new(cues.len() as u32 + 1, start, end, text_lines.join(" ")));
    }

    Ok(cues)
}

fn parse_timing(line_no: usize, line: &str) -> PlannerResult<(f64, f64)> {
    let (start, rest) = line
        .split_once("-->")
        .ok_or_else(|| PlannerError::srt_parse(line_no, "missing '-->'"))?;

    // Position hints may trail the end time
    let end = rest.split_whitespace().next().unwrap_or_default();

    Ok((parse_timestamp(start.trim())?, parse_timestamp(end)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1\r\n00:00:01,000 --> 00:00:02,500\r\nHello\r\nthere\r\n\r\n2\r\n00:00:03,000 --> 00:00:04,000\r\nworld\r\n";

    #[test]
    fn test_parse_crlf_and_multiline() {
        let cues = parse_srt(SAMPLE).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0], Cue::new(1, 1.0, 2.5, "Hello there"));
        assert_eq!(cues[1].text, "world");
    }

    #[test]
    fn test_parse_without_counters_and_extra_blank_lines() {
        let input = "\n\n00:00:01,000 --> 00:00:02,000\nA\n\n\n\n00:00:05,000 --> 00:00:06,000 X1:10\nB\n";
        let cues = parse_srt(input).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[1].index, 2);
        assert_eq!(cues[1].start, 5.0);
    }

    #[test]
    fn test_malformed_timing_is_timestamp_error() {
        let err = parse_srt("1\n00:00:aa,000 --> 00:00:02,000\nx\n").unwrap_err();
        assert!(matches!(err, PlannerError::MalformedTimestamp(_)));
    }

    #[test]
    fn test_garbage_block_is_parse_error() {
        let err = parse_srt("hello world\n").unwrap_err();
        assert!(matches!(err, PlannerError::SrtParse { line: 1, .. }));
    }

    #[test]
    fn test_format_then_parse_preserves_cues() {
        let cues = vec![Cue::new(1, 0.0, 1.25, "one"), Cue::new(2, 61.5, 62.0, "two")];
        let text = format_srt(&cues);
        assert!(text.starts_with("1\n00:00:00,000 --> 00:00:01,250\none\n\n"));
        assert_eq!(parse_srt(&text).unwrap(), cues);
    }
}
