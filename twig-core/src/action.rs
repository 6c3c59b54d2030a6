/// Every key the state machine reacts to is first resolved into an Action.
/// The UI never calls git directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Ctrl-C from any mode
    Cancel,

    // Normal
    EnterFilter,
    DeleteSelected,
    Select,

    // Movement
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,

    // Filter input
    LeaveFilter,
    FilterPush(char),
    FilterPop,
    FilterDeleteForward,
    FilterDeleteWord,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,

    // Force-delete confirmation
    ConfirmPush(char),
    ConfirmPop,
    ConfirmSubmit,
    ConfirmAbort,
}

/// Keys of the stash picker, resolved separately from the branch session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StashAction {
    Stage,
    Unstage,
    MoveUp,
    MoveDown,
    Finish,
    Cancel,
}
