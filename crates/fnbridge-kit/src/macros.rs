#[macro_export]
macro_rules! diagnosed_error {
    ($($arg:tt)*) => {{
        use $crate::types::diagnostics::Diagnostic;

        let res = format_args!($($arg)*).to_string();
        Diagnostic::error_from_string(res)
    }};
}

#[macro_export]
macro_rules! define_function_decl {
    (@param $name:ident, $doc:expr, $ts:expr $(, allow_null: $null:expr)? $(, allow_unknown: $unknown:expr)?) => {{
        #[allow(unused_mut)]
        let mut param = $crate::types::functions::FunctionParam::new(stringify!($name), $ts)
            .documented($doc);
        $(
            param.allow_null_value = $null;
        )?
        $(
            param.allow_unknown_values = $unknown;
        )?
        param
    }};
    {
        documentation: $doc:expr,
        parameters: [$($param_name:ident: { documentation: $param_doc:expr, typing: $param_ts:expr $(, allow_null: $param_null:expr)? $(, allow_unknown: $param_unknown:expr)? }),*],
        $(variadic_parameter: $var_name:ident: { documentation: $var_doc:expr, typing: $var_ts:expr $(, allow_null: $var_null:expr)? $(, allow_unknown: $var_unknown:expr)? },)?
        return_type: $ret_ts:expr $(,)?
    } => {
        $crate::types::functions::FunctionDecl {
            parameters: vec![$(
                $crate::define_function_decl!(@param $param_name, $param_doc, $param_ts $(, allow_null: $param_null)? $(, allow_unknown: $param_unknown)?)
            ),*],
            variadic_parameter: {
                #[allow(unused_mut)]
                let mut variadic = None;
                $(
                    variadic = Some($crate::define_function_decl!(@param $var_name, $var_doc, $var_ts $(, allow_null: $var_null)? $(, allow_unknown: $var_unknown)?));
                )?
                variadic
            },
            return_type: $ret_ts,
            documentation: String::from($doc),
            description_kind: $crate::types::functions::DescriptionKind::Plain,
        }
    };
}
