/// Domain policies - pure decision rules over domain values
mod fixed_version;

pub use fixed_version::latest_fixed_version;
