/// Builds an [`Ini`](crate::Ini) from section blocks.
///
/// Each block is a section name in brackets followed by `property => value` pairs.
/// Values may be anything that converts into a [`Value`](crate::Value). Use `[""]`
/// for properties of the empty section.
///
/// # Examples
///
/// ```rust
/// use mini_ini::ini;
///
/// let config = ini! {
///     [""] { "name" => "demo" },
///     ["net"] {
///         "host" => "localhost",
///         "port" => 8080,
///     },
/// };
///
/// assert_eq!(config.get(".name").unwrap(), "demo");
/// assert_eq!(config.get("net.port").unwrap().as_i64(), 8080);
/// ```
#[macro_export]
macro_rules! ini {
    () => {
        $crate::Ini::new()
    };

    ($( [ $section:expr ] { $( $property:expr => $value:expr ),* $(,)? } ),+ $(,)?) => {{
        #[allow(unused_mut)]
        let mut ini = $crate::Ini::new();
        $(
            #[allow(unused_variables)]
            let section: &str = $section;
            $(
                ini.set(section, $property, $value);
            )*
        )+
        ini
    }};
}
