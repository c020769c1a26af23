/// Return `ArityMismatch` unless `$items` holds exactly `$expected` entries.
macro_rules! require_args {
    ($op:expr, $items:expr, $expected:expr) => {
        if $items.len() != $expected {
            return Err($crate::backend::eval::SemanticError::ArityMismatch(format!(
                "{} (expected {} argument{}, got {})",
                $op,
                $expected,
                if $expected == 1 { "" } else { "s" },
                $items.len()
            )));
        }
    };
}

macro_rules! require_one_arg {
    ($op:expr, $items:expr) => {
        require_args!($op, $items, 1)
    };
}

macro_rules! require_two_args {
    ($op:expr, $items:expr) => {
        require_args!($op, $items, 2)
    };
}

macro_rules! require_three_args {
    ($op:expr, $items:expr) => {
        require_args!($op, $items, 3)
    };
}
