use strum_macros::Display;

#[derive(Clone, Debug, PartialEq, Eq, Display, Default)]
pub enum Author {
    Runpad,
    Runner,
    #[default]
    Model,
}
