use std::fmt::Display;

use log::error;

pub(crate) trait OptionExt<T> {
    fn log_none(self, msg: &str) -> Self;
}

impl<T> OptionExt<T> for Option<T> {
    fn log_none(self, msg: &str) -> Self {
        if self.is_none() {
            error!("{}", msg);
        }
        self
    }
}

pub(crate) trait ResultExt<T, E> {
    fn log_err(self) -> Self
    where
        E: Display;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn log_err(self) -> Self
    where
        E: Display,
    {
        if let Err(err) = &self {
            error!("{}", err);
        }
        self
    }
}
