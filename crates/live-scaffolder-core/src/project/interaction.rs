//! Prompt loop that keeps asking until a usable project name comes back

use super::name::{validate_name, NameRejection, ProjectName};
use std::io;
use std::path::Path;

/// Source of candidate names and sink for rejection messages
///
/// One prompt is outstanding at a time; the loop never calls `ask` again
/// before the previous answer has been validated.
pub trait NamePrompt {
    /// Ask the operator for a candidate name
    fn ask(&mut self) -> io::Result<String>;

    /// Tell the operator why the last candidate was rejected
    fn reject(&mut self, reason: &NameRejection) -> io::Result<()>;

    /// Give the terminal back once the loop is over
    fn release(&mut self) {}
}

/// Holds the prompt for the length of the loop and releases it on drop
///
/// Releasing on drop covers the accepted-name path, an error from `ask` or
/// `reject`, and unwinding.
struct PromptSession<'a, P: NamePrompt + ?Sized> {
    prompt: &'a mut P,
}

impl<'a, P: NamePrompt + ?Sized> PromptSession<'a, P> {
    fn new(prompt: &'a mut P) -> Self {
        Self { prompt }
    }
}

impl<P: NamePrompt + ?Sized> Drop for PromptSession<'_, P> {
    fn drop(&mut self) {
        self.prompt.release();
    }
}

enum NameState {
    Prompting,
    Accepted(ProjectName),
}

/// Prompt until a name passes [`validate_name`]
///
/// There is no attempt limit. The only ways out are an accepted name or an
/// I/O error from the prompt (which is how an operator abort surfaces).
/// Either way the prompt is released exactly once before returning.
pub fn acquire_project_name<P, F>(prompt: &mut P, exists: F) -> io::Result<ProjectName>
where
    P: NamePrompt + ?Sized,
    F: Fn(&Path) -> bool,
{
    let mut session = PromptSession::new(prompt);
    let mut state = NameState::Prompting;

    loop {
        state = match state {
            NameState::Prompting => {
                let candidate = session.prompt.ask()?;
                match validate_name(&candidate, &exists) {
                    Ok(name) => NameState::Accepted(name),
                    Err(reason) => {
                        session.prompt.reject(&reason)?;
                        NameState::Prompting
                    }
                }
            }
            NameState::Accepted(name) => return Ok(name),
        };
    }
}
