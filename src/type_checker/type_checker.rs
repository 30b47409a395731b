//! Typing rules, applied by the driver as it emits code.
//!
//! Each rule returns the type the construct produces, or the error to
//! report. Where the driver carries on after an error, the fallback type
//! it should use is documented on the rule.

use crate::{
    errors::errors::ErrorImpl,
    symbols::{
        scope::Resolved,
        symbol::{Kind, Signature, Type},
    },
};

/// Relational operators: operands of equal type yield `Boolean`.
///
/// On mismatch no comparison is emitted and the left type is kept.
pub fn check_relational(left: Type, right: Type) -> Result<Type, ErrorImpl> {
    if left == right {
        Ok(Type::Boolean)
    } else {
        Err(ErrorImpl::IncompatibleTypes)
    }
}

/// Additive and multiplicative operators need two integers.
///
/// The operator is emitted regardless and the result is `Integer` on mismatch.
pub fn check_arithmetic(left: Type, right: Type) -> Result<Type, ErrorImpl> {
    if left == Type::Integer && right == Type::Integer {
        Ok(Type::Integer)
    } else {
        Err(ErrorImpl::IntegerExpected)
    }
}

/// Unary minus. The result is `Integer` whether or not the operand was.
pub fn check_negation(operand: Type) -> Result<Type, ErrorImpl> {
    if operand == Type::Integer {
        Ok(Type::Integer)
    } else {
        Err(ErrorImpl::IntegerExpected)
    }
}

/// Guards of `if`, `while` and `for`.
pub fn check_condition(ty: Type) -> Result<(), ErrorImpl> {
    if ty == Type::Boolean {
        Ok(())
    } else {
        Err(ErrorImpl::BooleanExpected)
    }
}

/// The target of `:=` must be a variable.
pub fn check_assignable(target: &Resolved) -> Result<(), ErrorImpl> {
    if target.symbol.kind == Kind::Var {
        Ok(())
    } else {
        Err(ErrorImpl::AssignToNonVariable)
    }
}

/// The value stored into a const or var must have its declared type.
pub fn check_assignment(target: Type, value: Type) -> Result<(), ErrorImpl> {
    if target == value {
        Ok(())
    } else {
        Err(ErrorImpl::IncompatibleTypes)
    }
}

/// The guard of `x := g ? a : b`.
pub fn check_conditional_guard(guard: Type) -> Result<(), ErrorImpl> {
    if guard == Type::Boolean {
        Ok(())
    } else {
        Err(ErrorImpl::ConditionalBooleanExpected)
    }
}

/// Only integer variables can be read into.
pub fn check_read_target(target: &Resolved) -> Result<(), ErrorImpl> {
    let symbol = &target.symbol;
    if symbol.kind != Kind::Var {
        return Err(ErrorImpl::ReadKindMismatch {
            name: symbol.name.clone(),
            kind: symbol.kind.to_string(),
        });
    }
    if symbol.ty != Type::Integer {
        return Err(ErrorImpl::ReadTypeMismatch {
            name: symbol.name.clone(),
            type_: symbol.ty.to_string(),
        });
    }
    Ok(())
}

pub fn check_write_operand(ty: Type) -> Result<(), ErrorImpl> {
    if ty == Type::Integer {
        Ok(())
    } else {
        Err(ErrorImpl::IntegerExpected)
    }
}

/// Case labels must share the subject's type.
pub fn check_case_label(subject: Type, label: Type) -> Result<(), ErrorImpl> {
    if subject == label {
        Ok(())
    } else {
        Err(ErrorImpl::CaseTypeMismatch)
    }
}

/// Operand of a load: anything with storage.
pub fn check_loadable(target: &Resolved) -> Result<Type, ErrorImpl> {
    if target.symbol.kind.has_storage() {
        Ok(target.symbol.ty)
    } else {
        Err(ErrorImpl::VariableExpected)
    }
}

pub fn check_callable(target: &Resolved) -> Result<(), ErrorImpl> {
    if target.symbol.kind == Kind::Proc {
        Ok(())
    } else {
        Err(ErrorImpl::NotAProcedure)
    }
}

/// Argument count first, then each argument's type in order.
pub fn check_arguments(signature: &Signature, arguments: &[Type]) -> Result<(), ErrorImpl> {
    if signature.param_count() != arguments.len() {
        return Err(ErrorImpl::ArgumentCountMismatch {
            name: signature.name.clone(),
            expected: signature.param_count(),
            received: arguments.len(),
        });
    }

    for (index, (expected, received)) in signature.params.iter().zip(arguments.iter()).enumerate() {
        if expected != received {
            return Err(ErrorImpl::ArgumentTypeMismatch {
                name: signature.name.clone(),
                index: index + 1,
                expected: expected.to_string(),
                received: received.to_string(),
            });
        }
    }

    Ok(())
}
