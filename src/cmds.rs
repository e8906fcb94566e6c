use crate::host::Button;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    Press(Button),
    Exit,
}
