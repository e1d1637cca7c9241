use thiserror::Error;

/// Returned only by [`parse_color_strict`](crate::style::parse_color_strict).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("malformed color: {0:?}")]
    MalformedColor(String),
}

/// Errors raised while parsing a path's `d` attribute.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathDataError {
    #[error("unknown path command: {0}")]
    UnknownCommand(char),

    #[error("malformed number {token:?} in arguments of '{command}'")]
    MalformedNumber { command: char, token: String },

    #[error("'{command}' takes arguments in groups of {arity}, got {count}")]
    ArityMismatch {
        command: char,
        arity: usize,
        count: usize,
    },

    #[error("did not consume all path data ({count} items left): {chunks:?}")]
    UnconsumedData { count: usize, chunks: Vec<String> },
}

/// Errors that abort building a [`Document`](crate::Document).
#[derive(Error, Debug)]
pub enum SvgError {
    #[error("invalid path data in path {id:?}: {source}")]
    PathData {
        id: String,
        #[source]
        source: PathDataError,
    },

    #[error("unknown element: {0}")]
    UnknownElement(String),

    #[error("document has no root element")]
    MissingRoot,

    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("invalid escape in attribute value: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
}

/// Errors raised by [`SvgWriter`](crate::svg::SvgWriter).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SvgWriteError {
    #[error("restore_state without a matching save_state")]
    UnbalancedRestore,

    #[error("{0} saved state(s) never restored")]
    UnbalancedSave(usize),

    #[error(transparent)]
    Format(#[from] std::fmt::Error),
}
