//! The `chronoquiz play` command.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use chronoquiz_core::error::QuizError;
use chronoquiz_core::guess::parse_guess;
use chronoquiz_core::model::{format_year, Era, QuizConfig};
use chronoquiz_core::scoring::MAX_POINTS;
use chronoquiz_core::session::{prepare_session, AnswerOutcome, QuizSession, Verdict};

use crate::SourceArgs;

/// How the interactive loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Completed,
    Abandoned,
}

pub async fn execute(
    source: SourceArgs,
    length: Option<usize>,
    tag: Option<String>,
    min_year: Option<i32>,
    max_year: Option<i32>,
    seed: Option<u64>,
) -> Result<()> {
    let (config, parsed) = super::load::load_events(&source).await?;

    let quiz_config = QuizConfig {
        length: length.unwrap_or(config.default_length),
        tag_filter: tag,
        min_year,
        max_year,
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = match prepare_session(&parsed.pool, &quiz_config, &mut rng) {
        Ok(session) => session,
        Err(QuizError::EmptyResult) => anyhow::bail!(
            "No events match these filters ({} events loaded). \
             Loosen --tag or widen --min-year/--max-year and try again.",
            parsed.pool.len()
        ),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        session = %session.id(),
        "starting quiz with {} of {} matching events",
        session.len(),
        parsed.pool.len()
    );

    if session.len() < quiz_config.length {
        eprintln!(
            "Only {} matching events available; this quiz will be shorter.",
            session.len()
        );
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut session, stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

/// Drive a session from line-based input until it completes or the player quits.
///
/// Input lines are guesses (`1969`, `-44`, `44 BC`), `bc` / `ad` to switch the
/// era applied to bare numbers, or `q` to quit. End of input counts as quitting.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut QuizSession,
    mut input: R,
    out: &mut W,
) -> Result<SessionEnd> {
    let mut era = Era::Ad;
    let mut line = String::new();

    writeln!(out, "Guess the year! {} questions.", session.len())?;

    while let Some(event) = session.current_question() {
        let label = event.label.clone();
        let number = session.current_index() + 1;
        writeln!(out)?;
        writeln!(
            out,
            "Question {number}/{} | Score: {} / {} | {:.0}% complete",
            session.len(),
            session.total_score(),
            u32::from(MAX_POINTS) * session.current_index() as u32,
            session.progress() * 100.0
        )?;
        writeln!(out, "  {label}")?;

        let outcome = loop {
            write!(
                out,
                "Year [{era}] (e.g. 1969, -44, 44 BC; 'bc'/'ad' switch era, 'q' quits): "
            )?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                print_abandoned(session, out)?;
                return Ok(SessionEnd::Abandoned);
            }

            let entry = line.trim();
            match entry.to_ascii_lowercase().as_str() {
                "q" | "quit" | "exit" => {
                    print_abandoned(session, out)?;
                    return Ok(SessionEnd::Abandoned);
                }
                "bc" | "ad" | "bce" | "ce" => {
                    era = entry.parse().unwrap_or(era);
                    writeln!(out, "Era switched to {era}.")?;
                    continue;
                }
                _ => {}
            }

            match parse_guess(entry, era) {
                Ok(guess) => break session.submit_answer(guess)?,
                Err(QuizError::InvalidInput(msg)) => {
                    writeln!(out, "Invalid input: {msg}. Try again.")?;
                }
                Err(e) => return Err(e.into()),
            }
        };

        print_feedback(&outcome, out)?;
        session.advance()?;
    }

    print_results(session, out)?;
    Ok(SessionEnd::Completed)
}

fn print_feedback<W: Write>(outcome: &AnswerOutcome, out: &mut W) -> io::Result<()> {
    let points = outcome.points;
    match outcome.verdict {
        Verdict::Exact => writeln!(out, "Correct! {}  +{points} points", outcome.correct_date),
        Verdict::Close => writeln!(
            out,
            "Close! You said {}; the correct year was {}  +{points} points",
            format_year(outcome.guess),
            outcome.correct_date
        ),
        Verdict::Miss => writeln!(
            out,
            "Incorrect. You said {}; the correct year was {}  +0 points",
            format_year(outcome.guess),
            outcome.correct_date
        ),
    }
}

fn print_results<W: Write>(session: &QuizSession, out: &mut W) -> io::Result<()> {
    use comfy_table::{Cell, Table};

    let summary = session.summary();
    writeln!(out)?;
    writeln!(out, "Quiz finished!")?;
    writeln!(
        out,
        "You scored {}/{} ({:.1}%).",
        summary.total_score, summary.max_score, summary.percentage
    )?;

    let mut table = Table::new();
    table.set_header(vec!["Event", "Your guess", "Correct", "Points"]);
    for record in session.history() {
        table.add_row(vec![
            Cell::new(&record.label),
            Cell::new(format_year(record.guess)),
            Cell::new(format_year(record.correct_year)),
            Cell::new(record.points),
        ]);
    }
    writeln!(out, "\n{table}")
}

fn print_abandoned<W: Write>(session: &QuizSession, out: &mut W) -> io::Result<()> {
    let summary = session.summary();
    writeln!(
        out,
        "Quiz abandoned after {} of {} questions. Score: {}/{} ({:.1}% of answered).",
        summary.answered,
        summary.question_count,
        summary.total_score,
        summary.max_score,
        summary.answered_percentage()
    )
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chronoquiz_core::model::Event;
    use chronoquiz_core::session::SessionState;

    use super::*;

    fn play(events: Vec<Event>, input: &str) -> (QuizSession, SessionEnd, String) {
        let mut session = QuizSession::new(events);
        let mut out = Vec::new();
        let end = run_session(&mut session, Cursor::new(input.to_string()), &mut out).unwrap();
        (session, end, String::from_utf8(out).unwrap())
    }

    #[test]
    fn perfect_game() {
        let events = vec![
            Event::new("Moon landing", 1969).with_date(7, Some(20)),
            Event::new("Ides of March", -44).with_date(3, Some(15)),
            Event::new("Euro coins introduced", 2002),
        ];
        let (session, end, out) = play(events, "1969\n44 BC\n2002\n");
        assert_eq!(end, SessionEnd::Completed);
        assert_eq!(session.state(), SessionState::Complete);
        assert!(out.contains("Correct! 1969 AD (20 July)  +10 points"));
        assert!(out.contains("Correct! 44 BC (15 March)"));
        assert!(out.contains("You scored 30/30 (100.0%)."));
    }

    #[test]
    fn invalid_input_reprompts_without_scoring() {
        let (session, end, out) = play(vec![Event::new("Moon landing", 1969)], "soon\n0\n1968\n");
        assert_eq!(end, SessionEnd::Completed);
        assert_eq!(out.matches("Invalid input").count(), 2);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.total_score(), 5);
        assert!(out.contains("Close! You said 1968 AD"));
    }

    #[test]
    fn era_toggle_applies_to_bare_numbers() {
        let (session, _, out) = play(vec![Event::new("Founding of Rome", -753)], "bc\n753\n");
        assert!(out.contains("Era switched to BC."));
        assert_eq!(session.total_score(), 10);
    }

    #[test]
    fn quitting_prints_partial_summary() {
        let events = vec![Event::new("a", 1000), Event::new("b", 1100)];
        let (session, end, out) = play(events, "1000\nq\n");
        assert_eq!(end, SessionEnd::Abandoned);
        assert_eq!(session.current_index(), 1);
        assert!(out.contains("Quiz abandoned after 1 of 2 questions. Score: 10/20 (100.0% of answered)."));
    }

    #[test]
    fn end_of_input_abandons() {
        let (_, end, out) = play(vec![Event::new("a", 1000)], "");
        assert_eq!(end, SessionEnd::Abandoned);
        assert!(out.contains("Quiz abandoned after 0 of 1 questions"));
    }

    #[test]
    fn header_tracks_points_available_so_far() {
        let events = vec![Event::new("a", 1000), Event::new("b", 1100)];
        let (_, _, out) = play(events, "1000\nq\n");
        assert!(out.contains("Question 1/2 | Score: 0 / 0 | 0% complete"));
        assert!(out.contains("Question 2/2 | Score: 10 / 10 | 50% complete"));
    }

    #[test]
    fn miss_reports_correct_date() {
        let (session, _, out) = play(vec![Event::new("Moon landing", 1969)], "1800\n");
        assert_eq!(session.total_score(), 0);
        assert!(out.contains("Incorrect. You said 1800 AD; the correct year was 1969 AD  +0 points"));
    }
}
