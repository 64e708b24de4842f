use crate::cli::formatting::format_roles;

pub fn execute() -> String {
    format_roles()
}
