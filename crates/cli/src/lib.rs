pub mod cli;
pub mod logging;
pub mod output;
pub mod run;
pub mod styles;
