pub mod assemble;
pub mod inspect;
pub mod solve;
pub mod util;
