use anyhow::bail;
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use crate::divvy::{Decision, DecisionSource};
use crate::transaction::Transaction;

/// Keys selecting a choice, in menu order
const CHOICE_KEYS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Asks the operator for each decision, one keystroke at a time
pub(crate) struct TerminalPrompt;

enum Key {
    Char(char),
    Abort,
}

impl DecisionSource for TerminalPrompt {
    fn decide(&mut self, transaction: &Transaction, people: &[String]) -> anyhow::Result<Decision> {
        let choices = choices(people);
        let menu = menu(&choices);

        println!();
        println!("{}", transaction);
        loop {
            println!();
            println!("{}", menu);
            match read_key()? {
                Key::Char(c) => match choice_for(&choices, c) {
                    Some(decision) => {
                        println!("> {}", decision);
                        return Ok(decision);
                    },
                    None => println!("choice '{}' not found", c),
                },
                Key::Abort => bail!("interrupted"),
            }
        }
    }
}

/// One choice per person, then Split and Skip
fn choices(people: &[String]) -> Vec<(char, Decision)> {
    people.iter()
        .map(|person| Decision::Person(person.clone()))
        .chain([Decision::Split, Decision::Skip])
        .zip(CHOICE_KEYS)
        .map(|(decision, key)| (key, decision))
        .collect()
}

/// e.g. `[1] Anne  [2] Mark  [3] Split  [4] Skip`
fn menu(choices: &[(char, Decision)]) -> String {
    choices.iter()
        .map(|(key, decision)| format!("[{}] {}", key, decision))
        .collect::<Vec<String>>()
        .join("  ")
}

fn choice_for(choices: &[(char, Decision)], key: char) -> Option<Decision> {
    choices.iter()
        .find(|(k, _)| *k == key)
        .map(|(_, decision)| decision.clone())
}

/// Leaves raw mode when dropped, also on error
struct RawMode;

impl RawMode {
    fn enable() -> std::io::Result<RawMode> {
        terminal::enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Block until a key is pressed
fn read_key() -> anyhow::Result<Key> {
    let _raw_mode = RawMode::enable()?;
    loop {
        // `read()` blocks until an `Event` is available
        if let Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) = read()? {
            match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(Key::Abort),
                KeyCode::Esc => return Ok(Key::Abort),
                KeyCode::Char(c) => return Ok(Key::Char(c)),
                _ => {}
            }
        }
    }
}
