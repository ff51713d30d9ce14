use std::io::Cursor;

use dungeon_app::session::{LevelSource, RacingSource, Session, SessionSummary};
use dungeon_app::ui_text::{COLUMNS_PROMPT, GENERATING, ROWS_PROMPT};
use dungeon_core::{Dimensions, GeneratedLevel, GenerationBudget, GenerationError};

/// Sword (0,2), enemy (1,1), key (2,0), stairs (2,2).
const LAYOUT: &str = "~ ~ ?
                      ~ ! ~
                      $ ~ ^";

/// Serves the same layout every round and records what was asked for.
#[derive(Default)]
struct FixedSource {
    requests: Vec<(usize, usize, u32)>,
}

impl LevelSource for FixedSource {
    fn level(
        &mut self,
        dimensions: Dimensions,
        round: u32,
    ) -> Result<GeneratedLevel, GenerationError> {
        self.requests.push((dimensions.rows(), dimensions.columns(), round));
        Ok(GeneratedLevel::from_layout(LAYOUT.parse().expect("layout should parse")))
    }
}

struct FailingSource;

impl LevelSource for FailingSource {
    fn level(&mut self, _: Dimensions, _: u32) -> Result<GeneratedLevel, GenerationError> {
        Err(GenerationError::BudgetExhausted { attempts: 3 })
    }
}

fn run_script(
    script: &str,
    source: &mut FixedSource,
    fixed: Option<Dimensions>,
) -> (SessionSummary, String) {
    let mut output = Vec::new();
    let summary = Session::new(Cursor::new(script.as_bytes()), &mut output, source, fixed)
        .run()
        .expect("scripted session should run");
    (summary, String::from_utf8(output).expect("output is utf-8"))
}

#[test]
fn winning_round_announces_each_event() {
    let mut source = FixedSource::default();
    let script = "3\n3\n\nr\nr\nl\nd\nd\nl\nr\nr\n\n";
    let (summary, output) = run_script(script, &mut source, None);

    assert_eq!(summary, SessionSummary { rounds: 1, wins: 1, losses: 0 });
    assert_eq!(source.requests, vec![(3, 3, 0)]);
    let events: Vec<&str> = output.lines().filter(|line| line.starts_with("~~~~")).collect();
    assert_eq!(
        events,
        vec![
            "~~~~ Welcome! ~~~~",
            "~~~~ Sword obtained! ~~~~",
            "~~~~ Enemy defeated! ~~~~",
            "~~~~ Key obtained! ~~~~",
            "~~~~ You won! ~~~~",
        ]
    );
    assert!(output.contains(". ~ ?\n~ ! ~\n$ ~ ^\n"), "starting board missing:\n{output}");
    assert!(output.contains("~ ~ ~\n~ ~ ~\n~ ~ .\n"), "final board missing:\n{output}");
    assert!(output.contains("Escaped in 8 move(s)."));
}

#[test]
fn bad_answers_are_asked_again_and_a_loss_can_be_replayed() {
    let mut source = FixedSource::default();
    let script = "2\nabc\n3\n3\n\nx\nd\nr\nyes\n4\n3\n";
    let (summary, output) = run_script(script, &mut source, None);

    assert_eq!(summary, SessionSummary { rounds: 1, wins: 0, losses: 1 });
    assert_eq!(source.requests, vec![(3, 3, 0), (3, 4, 1)]);
    assert_eq!(output.matches(COLUMNS_PROMPT).count(), 4);
    assert_eq!(output.matches(ROWS_PROMPT).count(), 2);
    assert!(output.contains("2 is too small; must be greater than 2"));
    assert!(output.contains("'abc' is not a whole number"));
    assert!(output.contains("'x' is not a move"));
    assert!(output.contains("~~~~ You died! ~~~~"));
    // The unarmed player stays next to the enemy.
    assert!(output.contains("~ ~ ?\n. ! ~\n$ ~ ^\n"), "board after death missing:\n{output}");
}

#[test]
fn fixed_size_skips_the_size_prompts() {
    let mut source = FixedSource::default();
    let fixed = Dimensions::new(3, 3).expect("3x3 is valid");
    let (summary, output) = run_script("", &mut source, Some(fixed));

    assert_eq!(summary, SessionSummary::default());
    assert_eq!(source.requests, vec![(3, 3, 0)]);
    assert!(!output.contains(COLUMNS_PROMPT));
    assert!(output.starts_with(GENERATING));
}

#[test]
fn empty_input_ends_before_anything_is_generated() {
    let mut source = FixedSource::default();
    let (summary, output) = run_script("", &mut source, None);

    assert_eq!(summary, SessionSummary::default());
    assert!(source.requests.is_empty());
    assert_eq!(output, COLUMNS_PROMPT);
}

#[test]
fn generation_failure_is_reported() {
    let mut output = Vec::new();
    let fixed = Dimensions::new(4, 4).expect("4x4 is valid");
    let err = Session::new(Cursor::new(&b""[..]), &mut output, FailingSource, Some(fixed))
        .run()
        .expect_err("exhausted budget should fail the session");

    let message = format!("{err:#}");
    assert!(message.contains("failed to generate a 4x4 dungeon"), "{message}");
    assert!(message.contains("no solvable layout found in 3 attempt(s)"), "{message}");
}

#[test]
fn racing_source_serves_a_playable_board() {
    let fixed = Dimensions::new(5, 5).expect("5x5 is valid");
    let source = RacingSource::new(2, 31, GenerationBudget::Unbounded);
    let mut output = Vec::new();
    let summary = Session::new(Cursor::new(&b"\n"[..]), &mut output, source, Some(fixed))
        .run()
        .expect("generation is unbounded");
    let output = String::from_utf8(output).expect("output is utf-8");

    assert_eq!(summary, SessionSummary::default());
    let board: Vec<&str> = output
        .lines()
        .skip_while(|line| !line.ends_with("= you"))
        .skip(1)
        .take(5)
        .collect();
    assert_eq!(board.len(), 5, "board missing:\n{output}");
    assert!(board[0].starts_with(". "));
    assert!(board.iter().all(|line| line.split(' ').count() == 5));
}
