use strum::{AsRefStr, Display, EnumString};

use super::types::Type;

/// How a documentation string should be rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DescriptionKind {
    #[default]
    Plain,
    Markdown,
}

/// A positional parameter of a provider function.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionParam {
    /// Only used for documentation and error messages: arguments are positional.
    pub name: String,
    pub typing: Type,
    pub allow_null_value: bool,
    pub allow_unknown_values: bool,
    pub documentation: String,
    pub description_kind: DescriptionKind,
}

impl FunctionParam {
    pub fn new(name: &str, typing: Type) -> Self {
        FunctionParam {
            name: name.to_string(),
            typing,
            allow_null_value: false,
            allow_unknown_values: false,
            documentation: String::new(),
            description_kind: DescriptionKind::Plain,
        }
    }

    pub fn allow_null(mut self) -> Self {
        self.allow_null_value = true;
        self
    }

    pub fn allow_unknown(mut self) -> Self {
        self.allow_unknown_values = true;
        self
    }

    pub fn documented(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    pub fn with_description_kind(mut self, kind: DescriptionKind) -> Self {
        self.description_kind = kind;
        self
    }

    /// A `null` literal is dynamically typed, so a dynamic parameter has to let
    /// it through whatever `allow_null_value` says.
    pub fn accepts_null(&self) -> bool {
        self.allow_null_value || self.typing.is_dynamic()
    }
}

/// The signature a provider declared for one of its functions.
///
/// The declaration does not know its own name or provider: both are supplied
/// when a callable is built from it.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub parameters: Vec<FunctionParam>,
    pub variadic_parameter: Option<FunctionParam>,
    pub return_type: Type,
    pub documentation: String,
    pub description_kind: DescriptionKind,
}

impl FunctionDecl {
    pub fn new(parameters: Vec<FunctionParam>, return_type: Type) -> Self {
        FunctionDecl {
            parameters,
            variadic_parameter: None,
            return_type,
            documentation: String::new(),
            description_kind: DescriptionKind::Plain,
        }
    }

    pub fn with_variadic_parameter(mut self, param: FunctionParam) -> Self {
        self.variadic_parameter = Some(param);
        self
    }

    pub fn documented(mut self, documentation: impl Into<String>, kind: DescriptionKind) -> Self {
        self.documentation = documentation.into();
        self.description_kind = kind;
        self
    }

    /// The parameter an argument at `position` is matched against.
    pub fn parameter_at(&self, position: usize) -> Option<&FunctionParam> {
        self.parameters.get(position).or(self.variadic_parameter.as_ref())
    }

    pub fn accepts_arity(&self, count: usize) -> bool {
        match self.variadic_parameter {
            Some(_) => count >= self.parameters.len(),
            None => count == self.parameters.len(),
        }
    }

    /// Human readable arity, as used in error messages.
    pub fn expected_arity(&self) -> String {
        match self.variadic_parameter {
            Some(_) => format!("at least {}", self.parameters.len()),
            None => format!("{}", self.parameters.len()),
        }
    }
}
