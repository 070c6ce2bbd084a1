mod common;
mod end_to_end;
mod session_restore;
