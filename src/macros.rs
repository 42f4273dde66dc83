// src/macros.rs

/// `String` shorthand: `s!()` is empty, `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate `&str` pieces into one `String` (alert bodies, status lines).
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut out = ::std::string::String::from($first);
        $( out.push_str($rest); )+
        out
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn shorthands() {
        assert_eq!(s!(), "");
        assert_eq!(s!("abc"), "abc");
        assert_eq!(join!("a", "b", &s!("c")), "abc");
    }
}
