//! Colored, level-prefixed terminal output.
//!
//! `info!` goes to stdout, everything else to stderr so status lines stay
//! pipeable.

#[doc(hidden)]
#[macro_export]
macro_rules! __newdoc_prefixed {
    ($print:ident, $stream:ident, $label:literal, $style:expr, $($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            $print!(
                "{}: {}",
                $label.if_supports_color(owo_colors::Stream::$stream, |s| s.style($style)),
                format_args!($($arg)+)
            );
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::__newdoc_prefixed!(
            eprintln,
            Stderr,
            "error",
            owo_colors::Style::new().bold().red(),
            $($arg)+
        )
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::__newdoc_prefixed!(
            eprintln,
            Stderr,
            "warning",
            owo_colors::Style::new().bold().yellow(),
            $($arg)+
        )
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::__newdoc_prefixed!(
            println,
            Stdout,
            "info",
            owo_colors::Style::new().bold().green(),
            $($arg)+
        )
    };
}

/// Prints only when `NEWDOC_TRACE` is set.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        if std::env::var_os("NEWDOC_TRACE").is_some() {
            $crate::__newdoc_prefixed!(
                eprintln,
                Stderr,
                "trace",
                owo_colors::Style::new().bold(),
                $($arg)+
            )
        }
    };
}
