use crate::editor::{
    CommandRunner, FILE_PLACEHOLDER, LaunchDescriptor, chain_for, default_chain, launch_first,
    open_in_editor,
};
use crate::error::editor::EditorError;

use std::collections::HashMap;
use std::io::{self, ErrorKind};
use std::path::Path;
use std::sync::Mutex;

/// Scripted runner: programs map to an exit code, anything else is "not found".
#[derive(Default)]
struct ScriptedRunner {
    exits: HashMap<String, i32>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedRunner {
    fn with_exit(mut self, program: &str, code: i32) -> Self {
        self.exits.insert(program.to_string(), code);
        self
    }

    fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().expect("lock").clone()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> io::Result<Option<i32>> {
        self.calls
            .lock()
            .expect("lock")
            .push((program.to_string(), args.to_vec()));
        match self.exits.get(program) {
            Some(code) => Ok(Some(*code)),
            None => Err(io::Error::new(ErrorKind::NotFound, "not found")),
        }
    }
}

/// **VALUE**: Verifies the default chain order and templates.
///
/// **WHY THIS MATTERS**: Insiders users run both builds; trying `code` first
/// would open their stable install instead.
#[test]
fn given_auto_editor_when_chain_built_then_matches_default_order() {
    let chain = chain_for("auto");

    let programs: Vec<_> = chain.iter().map(|d| d.program.as_str()).collect();
    assert_eq!(programs, vec!["code-insiders", "code", "open", "open"]);
    assert_eq!(
        chain[2].args,
        vec!["-a", "Visual Studio Code - Insiders", FILE_PLACEHOLDER]
    );
    assert_eq!(chain, default_chain());
}

/// **VALUE**: Verifies a configured editor is tried before the defaults.
#[test]
fn given_custom_editor_when_chain_built_then_editor_is_prepended() {
    let chain = chain_for("subl");

    assert_eq!(chain[0], LaunchDescriptor::new("subl", [FILE_PLACEHOLDER]));
    assert_eq!(chain.len(), default_chain().len() + 1);
}

/// **VALUE**: Verifies every `{file}` placeholder is substituted.
#[test]
fn given_template_when_rendered_then_placeholder_is_replaced() {
    let descriptor = LaunchDescriptor::new("ed", ["--goto", "{file}:1", FILE_PLACEHOLDER]);

    let args = descriptor.render_args("/tmp/a b.py");

    assert_eq!(args, vec!["--goto", "/tmp/a b.py:1", "/tmp/a b.py"]);
}

/// **VALUE**: Verifies N failing entries followed by a working one.
///
/// **WHY THIS MATTERS**: The success must be attributed to the entry that
/// actually opened the file, and nothing after it may run (a second editor
/// window would pop up).
///
/// **BUG THIS CATCHES**: Would catch an off-by-one in the reported index or a
/// loop that keeps going after a zero exit.
#[tokio::test]
async fn given_two_missing_then_working_entry_when_opened_then_third_wins() {
    // GIVEN: code-insiders and code missing, `open` exits 0
    let runner = ScriptedRunner::default().with_exit("open", 0);
    let chain = default_chain();

    // WHEN: Opening a file
    let launched = open_in_editor(&runner, &chain, Path::new("/w/1-two-sum/solution.py"))
        .await
        .expect("should launch");

    // THEN: Entry 2 wins, entry 3 never runs
    assert_eq!(launched.index, 2);
    assert_eq!(launched.program, "open");
    let calls = runner.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(
        calls[2].1,
        vec!["-a", "Visual Studio Code - Insiders", "/w/1-two-sum/solution.py"]
    );
}

/// **VALUE**: Verifies a nonzero exit counts as failure and advances the chain.
#[tokio::test]
async fn given_nonzero_exit_when_opened_then_next_entry_is_tried() {
    let runner = ScriptedRunner::default()
        .with_exit("code-insiders", 1)
        .with_exit("code", 0);

    let launched = open_in_editor(&runner, &default_chain(), Path::new("/f"))
        .await
        .expect("should launch");

    assert_eq!(launched.index, 1);
    assert_eq!(runner.calls().len(), 2);
}

/// **VALUE**: Verifies an exhausted chain reports every attempted program.
#[tokio::test]
async fn given_nothing_installed_when_opened_then_returns_not_found() {
    let runner = ScriptedRunner::default();

    let result = launch_first(&runner, &default_chain(), "/f").await;

    match result {
        Err(EditorError::NotFound { attempts, .. }) => {
            assert_eq!(attempts, vec!["code-insiders", "code", "open", "open"]);
        }
        Ok(launched) => panic!("expected NotFound, got {launched:?}"),
    }
    assert_eq!(runner.calls().len(), 4);
}
