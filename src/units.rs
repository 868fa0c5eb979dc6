//! This module defines various unit types and their conversions.
use float_cmp::{ApproxEq, F64Margin};
use serde::{Deserialize, Serialize};

/// A quantity which is a thin wrapper around an `f64`
pub trait UnitType: Copy {
    /// Create a new quantity from a raw `f64`
    fn new(value: f64) -> Self;

    /// The raw value of the quantity
    fn value(&self) -> f64;
}

/// Represents a dimensionless quantity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::Sub,
)]
pub struct Dimensionless(pub f64);

impl std::ops::Mul for Dimensionless {
    type Output = Dimensionless;

    fn mul(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 * rhs.0)
    }
}

impl std::ops::Div for Dimensionless {
    type Output = Dimensionless;

    fn div(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless(self.0 / rhs.0)
    }
}

impl UnitType for Dimensionless {
    fn new(value: f64) -> Self {
        Self(value)
    }

    fn value(&self) -> f64 {
        self.0
    }
}

macro_rules! unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            Serialize,
            Deserialize,
            derive_more::Add,
            derive_more::Sub,
            derive_more::Display,
        )]
        pub struct $name(pub f64);

        impl UnitType for $name {
            fn new(value: f64) -> Self {
                Self(value)
            }

            fn value(&self) -> f64 {
                self.0
            }
        }

        impl $name {
            /// Whether the underlying value is neither infinite nor NaN
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl std::ops::Mul<Dimensionless> for $name {
            type Output = $name;
            fn mul(self, rhs: Dimensionless) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Mul<$name> for Dimensionless {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Div<Dimensionless> for $name {
            type Output = $name;
            fn div(self, rhs: Dimensionless) -> $name {
                $name(self.0 / rhs.0)
            }
        }

        impl std::ops::Div for $name {
            type Output = Dimensionless;
            fn div(self, rhs: $name) -> Dimensionless {
                Dimensionless(self.0 / rhs.0)
            }
        }

        impl ApproxEq for $name {
            type Margin = F64Margin;

            fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
                self.0.approx_eq(other.0, margin)
            }
        }
    };
}

macro_rules! impl_mul {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Mul<$Rhs> for $Lhs {
            type Output = $Out;
            fn mul(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 * rhs.0)
            }
        }
        impl std::ops::Mul<$Lhs> for $Rhs {
            type Output = $Out;
            fn mul(self, lhs: $Lhs) -> $Out {
                <$Out>::new(self.0 * lhs.0)
            }
        }
    };
}

macro_rules! impl_div {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Div<$Rhs> for $Lhs {
            type Output = $Out;
            fn div(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 / rhs.0)
            }
        }
    };
}

// Base quantities
unit_struct!(Miles);
unit_struct!(Gallons);
unit_struct!(KilowattHours);
unit_struct!(Dollars);
unit_struct!(Cents);
unit_struct!(GramsCO2);
unit_struct!(KilogramsCO2);

// Derived quantities
unit_struct!(MilesPerGallon);
unit_struct!(KilowattHoursPerMile);
unit_struct!(DollarsPerGallon);
unit_struct!(DollarsPerKilowattHour);
unit_struct!(CentsPerKilowattHour);
unit_struct!(GramsCO2PerMile);
unit_struct!(GramsCO2PerKilowattHour);

// Division rules
impl_div!(Miles, MilesPerGallon, Gallons);

// Multiplication rules
impl_mul!(Miles, KilowattHoursPerMile, KilowattHours);
impl_mul!(Gallons, DollarsPerGallon, Dollars);
impl_mul!(KilowattHours, DollarsPerKilowattHour, Dollars);
impl_mul!(KilowattHours, CentsPerKilowattHour, Cents);
impl_mul!(Miles, GramsCO2PerMile, GramsCO2);
impl_mul!(KilowattHours, GramsCO2PerKilowattHour, GramsCO2);

impl CentsPerKilowattHour {
    /// Convert an electricity price in cents to dollars
    pub fn to_dollars(self) -> DollarsPerKilowattHour {
        DollarsPerKilowattHour(self.0 / 100.0)
    }
}

impl Cents {
    /// Convert an amount in cents to dollars
    pub fn to_dollars(self) -> Dollars {
        Dollars(self.0 / 100.0)
    }
}

impl GramsCO2 {
    /// Convert a mass of CO2 in grams to kilograms
    pub fn to_kilograms(self) -> KilogramsCO2 {
        KilogramsCO2(self.0 / 1000.0)
    }
}

/// Round a quantity to the given number of decimal places
pub fn round_to<T: UnitType>(quantity: T, decimal_places: i32) -> T {
    let factor = 10f64.powi(decimal_places);
    T::new((quantity.value() * factor).round() / factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[test]
    fn test_energy_from_distance() {
        let energy = Miles(10.0) * KilowattHoursPerMile(0.3);
        assert_approx_eq!(KilowattHours, energy, KilowattHours(3.0));
    }

    #[test]
    fn test_fuel_from_distance() {
        let fuel = Miles(60.0) / MilesPerGallon(30.0);
        assert_approx_eq!(Gallons, fuel, Gallons(2.0));
        assert_approx_eq!(Dollars, fuel * DollarsPerGallon(3.5), Dollars(7.0));
    }

    #[test]
    fn test_price_conversion() {
        let price = CentsPerKilowattHour(13.5).to_dollars();
        assert_approx_eq!(DollarsPerKilowattHour, price, DollarsPerKilowattHour(0.135));
        assert_approx_eq!(Dollars, KilowattHours(10.0) * price, Dollars(1.35));
    }

    #[test]
    fn test_cents_to_dollars() {
        let cost = KilowattHours(10.0) * CentsPerKilowattHour(13.5);
        assert_approx_eq!(Cents, cost, Cents(135.0));
        assert_approx_eq!(Dollars, cost.to_dollars(), Dollars(1.35));
    }

    #[test]
    fn test_to_kilograms() {
        assert_eq!(GramsCO2(2500.0).to_kilograms(), KilogramsCO2(2.5));
    }

    #[test]
    fn test_ratio_of_like_quantities() {
        assert_eq!(Miles(25.0) / Miles(100.0), Dimensionless(0.25));
    }

    #[rstest]
    #[case(354.775_000_1, 2, 354.78)]
    #[case(354.774_9, 2, 354.77)]
    #[case(1234.5, 0, 1235.0)]
    #[case(-0.004, 2, 0.0)]
    fn test_round_to(#[case] value: f64, #[case] places: i32, #[case] expected: f64) {
        assert_approx_eq!(
            Dollars,
            round_to(Dollars(value), places),
            Dollars(expected),
            epsilon = 1e-9
        );
    }
}
