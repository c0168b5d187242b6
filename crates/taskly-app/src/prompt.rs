/// Blocking confirmation dialog presented before destructive actions.
///
/// The list and user controllers never delete without an affirmative answer
/// from this collaborator; what "presenting" means is up to the hosting
/// shell.
pub trait ConfirmPrompt {
    /// Present `message` and report whether the user confirmed.
    fn confirm(&self, message: &str) -> bool;
}
