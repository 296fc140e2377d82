use std::io::{BufRead, Write};

use crate::domain::question::{GuessOutcome, QuizQuestion};
use crate::quiz::{
    score::FinalScore,
    session::{Advanced, QuizSession},
};

const HELP: &str = "commands: <slot 1-3> <track id> | reveal | next | quit";

enum Command<'a> {
    Guess { slot: usize, track_id: &'a str },
    Reveal,
    Next,
    Quit,
    Help,
}

fn parse_command(line: &str) -> Option<Command<'_>> {
    let mut words = line.split_whitespace();
    let first = words.next()?;
    let command = match first {
        "reveal" => Command::Reveal,
        "next" => Command::Next,
        "quit" | "exit" => Command::Quit,
        "help" | "?" => Command::Help,
        slot => {
            let slot: usize = slot.parse().ok()?;
            Command::Guess {
                slot: slot.checked_sub(1)?,
                track_id: words.next()?,
            }
        }
    };
    match words.next() {
        Some(_) => None,
        None => Some(command),
    }
}

fn print_question<W: Write>(session: &QuizSession<'_>, out: &mut W) -> std::io::Result<()> {
    let progress = session.progress();
    writeln!(
        out,
        "\nQuestion {} / {} ({}% done)",
        progress.current_question, progress.total_questions, progress.progress_percentage
    )?;
    for (slot, cue) in session.playback_cues().into_iter().flatten().enumerate() {
        writeln!(
            out,
            "  [{}] {} from {}s for {}s",
            slot + 1,
            cue.media_url,
            cue.start_seconds,
            cue.duration_seconds
        )?;
    }
    Ok(())
}

fn print_answers<W: Write>(question: &QuizQuestion, out: &mut W) -> std::io::Result<()> {
    for (slot, track) in question.tracks.iter().enumerate() {
        let mark = if question.is_identified(&track.id) { "✓" } else { " " };
        writeln!(out, "  {mark} [{}] {} ({})", slot + 1, track.title, track.id)?;
    }
    Ok(())
}

fn print_choices<W: Write>(session: &QuizSession<'_>, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Tracks to choose from:")?;
    for album in session.answer_albums() {
        writeln!(out, "  {}", album.name)?;
        for track in &album.tracks {
            writeln!(out, "    {}  {}", track.id, track.title)?;
        }
    }
    Ok(())
}

/// Runs the quiz over line based input.
///
/// Returns the final score, or `None` when the player quit or input ended.
pub fn play<R, W>(
    session: &mut QuizSession<'_>,
    input: R,
    mut out: W,
) -> anyhow::Result<Option<FinalScore>>
where
    R: BufRead,
    W: Write,
{
    print_choices(session, &mut out)?;
    writeln!(out, "{HELP}")?;
    print_question(session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = parse_command(&line) else {
            writeln!(out, "?? {}\n{HELP}", line.trim())?;
            continue;
        };

        match command {
            Command::Guess { slot, track_id } => match session.guess_slot(slot, track_id) {
                Ok(GuessOutcome::Correct) => writeln!(out, "Correct!")?,
                Ok(GuessOutcome::AlreadyAnswered) => writeln!(out, "Already identified")?,
                Ok(GuessOutcome::Incorrect) => writeln!(out, "Wrong, try again")?,
                Err(e) => writeln!(out, "{e}")?,
            },

            Command::Reveal => {
                let question = session.reveal()?;
                print_answers(question, &mut out)?;
            }

            Command::Next => match session.advance() {
                Ok(Advanced::Next(_)) => print_question(session, &mut out)?,
                Ok(Advanced::Finished(score)) => {
                    writeln!(
                        out,
                        "\nScore: {}/{} ({}%), perfect questions: {}\n{}",
                        score.total_correct,
                        score.total_possible,
                        score.percentage,
                        score.perfect_questions,
                        score.grade().message()
                    )?;
                    for question in session.questions() {
                        writeln!(out, "Question {}:", question.question_number)?;
                        print_answers(question, &mut out)?;
                    }
                    return Ok(Some(score));
                }
                Err(e) => writeln!(out, "{e}")?,
            },

            Command::Quit => return Ok(None),

            Command::Help => writeln!(out, "{HELP}")?,
        }

        if session.can_advance() && !session.progress().is_last_question {
            writeln!(out, "Type \"next\" for the next question")?;
        }
    }

    Ok(None)
}
