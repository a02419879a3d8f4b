// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in adapter modules.
//!
//! Two modules are compiled into the binary and loaded at startup:
//! - `tcutils.builtin.text`: `echo`
//! - `tcutils.builtin.fs`: `clean-filename`, `permissions`
//!
//! The fs module also carries the abstract `fs-command` contract, which
//! scans skip.

use tcutils_adapters::{default_factory, AdapterDescriptor, Module, ModuleDirectory};
use tcutils_core::{Adapter, Arguments, Capability, Member, TcutilsError, Value};
use tcutils_fs::{clean_filename, PosixPermissions};

/// Contract for adapters that work on file names and modes.
pub const FS_COMMAND: Capability = Capability("fs-command");

pub const ECHO: AdapterDescriptor =
    AdapterDescriptor::concrete("echo", &[], default_factory::<Echo>);
pub const CLEAN_FILENAME: AdapterDescriptor = AdapterDescriptor::concrete(
    "clean-filename",
    &[FS_COMMAND],
    default_factory::<CleanFilename>,
);
pub const PERMISSIONS: AdapterDescriptor = AdapterDescriptor::concrete(
    "permissions",
    &[FS_COMMAND],
    default_factory::<Permissions>,
);
pub const FS_COMMAND_CONTRACT: AdapterDescriptor =
    AdapterDescriptor::incomplete("fs-command", &[FS_COMMAND]);

/// Namespace holding every built-in module.
pub const BUILTIN_NAMESPACE: &str = "tcutils.builtin";

/// The modules compiled into the binary.
pub fn builtin_modules() -> ModuleDirectory {
    ModuleDirectory::new()
        .with(Module::new("tcutils.builtin.text").with_adapter(ECHO))
        .with(
            Module::new("tcutils.builtin.fs")
                .with_adapter(FS_COMMAND_CONTRACT)
                .with_adapter(CLEAN_FILENAME)
                .with_adapter(PERMISSIONS),
        )
}

/// Positional argument `index` as a string.
fn text_arg<'a>(
    adapter: &str,
    args: &'a Arguments,
    index: usize,
) -> Result<&'a str, TcutilsError> {
    args.get(index).and_then(Value::as_str).ok_or_else(|| {
        TcutilsError::operation(
            adapter,
            format!("expected a string argument at position {index}"),
        )
    })
}

/// Joins its positional arguments with a space.
#[derive(Debug, Default)]
pub struct Echo;

impl Echo {
    fn joined(args: &Arguments) -> String {
        args.positional
            .iter()
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Adapter for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn execute(&self, args: &Arguments) -> Result<Value, TcutilsError> {
        Ok(Value::from(Self::joined(args)))
    }

    fn member(&self, name: &str) -> Option<Member> {
        match name {
            "upper" => Some(Member::Operation),
            "separator" => Some(Member::Attribute(Value::from(" "))),
            _ => None,
        }
    }

    fn invoke(&self, method: &str, args: &Arguments) -> Result<Value, TcutilsError> {
        match method {
            "upper" => Ok(Value::from(Self::joined(args).to_uppercase())),
            _ => Err(TcutilsError::UnknownMethod {
                adapter: self.name().to_string(),
                method: method.to_string(),
            }),
        }
    }
}

/// Sanitizes its first argument into a safe file name.
#[derive(Debug, Default)]
pub struct CleanFilename;

impl Adapter for CleanFilename {
    fn name(&self) -> &str {
        "clean-filename"
    }

    fn execute(&self, args: &Arguments) -> Result<Value, TcutilsError> {
        let name = text_arg(self.name(), args, 0)?;
        Ok(Value::from(clean_filename(name)))
    }
}

/// Describes an octal permission string.
#[derive(Debug, Default)]
pub struct Permissions;

impl Permissions {
    fn parse(&self, args: &Arguments) -> Result<PosixPermissions, TcutilsError> {
        match args.get(0) {
            Some(Value::Number(n)) => match n.as_u64() {
                Some(mode) => PosixPermissions::from_octal(&format!("{mode:03}")),
                None => Err(TcutilsError::InvalidPermissions(n.to_string())),
            },
            _ => PosixPermissions::from_octal(text_arg(self.name(), args, 0)?),
        }
    }
}

impl Adapter for Permissions {
    fn name(&self) -> &str {
        "permissions"
    }

    fn execute(&self, args: &Arguments) -> Result<Value, TcutilsError> {
        let mode = self.parse(args)?;
        Ok(serde_json::json!({
            "octal": mode.to_octal_str(),
            "symbolic": mode.symbolic(),
        }))
    }

    fn member(&self, name: &str) -> Option<Member> {
        match name {
            "symbolic" | "octal" => Some(Member::Operation),
            _ => None,
        }
    }

    fn invoke(&self, method: &str, args: &Arguments) -> Result<Value, TcutilsError> {
        let mode = self.parse(args)?;
        match method {
            "symbolic" => Ok(Value::from(mode.symbolic())),
            "octal" => Ok(Value::from(mode.to_octal_str())),
            _ => Err(TcutilsError::UnknownMethod {
                adapter: self.name().to_string(),
                method: method.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_joins_arguments() {
        let args = Arguments::new().arg("hello").arg(42);
        assert_eq!(Echo.execute(&args).unwrap(), Value::from("hello 42"));
        assert_eq!(Echo.invoke("upper", &args).unwrap(), Value::from("HELLO 42"));
    }

    #[test]
    fn clean_filename_requires_a_string() {
        let args = Arguments::new().arg("On€ Unicódę File");
        assert_eq!(
            CleanFilename.execute(&args).unwrap(),
            Value::from("On_Unicode_File")
        );

        let err = CleanFilename.execute(&Arguments::new()).unwrap_err();
        assert!(matches!(err, TcutilsError::Operation { .. }));
    }

    #[test]
    fn permissions_accepts_text_and_numbers() {
        let result = Permissions.execute(&Arguments::new().arg("4755")).unwrap();
        assert_eq!(result["octal"], "4755");
        assert_eq!(result["symbolic"], "rwsr-xr-x");

        let symbolic = Permissions
            .invoke("symbolic", &Arguments::new().arg(644))
            .unwrap();
        assert_eq!(symbolic, Value::from("rw-r--r--"));
    }

    #[test]
    fn builtin_modules_live_under_one_namespace() {
        let modules = builtin_modules();
        assert!(!modules.contains(BUILTIN_NAMESPACE));
        assert_eq!(modules.descendants(BUILTIN_NAMESPACE, true).count(), 2);
    }
}
