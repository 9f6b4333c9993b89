//! Built-in unit table, organized by category
//!
//! Factors are ratios to each category's base unit. Exact definitions
//! (international yard and pound, US customary volume) are used where
//! they exist.

use crate::category::{Category, UnitDefinition, IMPERIAL, METRIC};
use crate::registry::UnitRegistry;
use crate::temperature;

const US: &str = "us";
const NAUTICAL: &str = "nautical";
const SCIENTIFIC: &str = "scientific";
const DECIMAL: &str = "decimal";
const BINARY: &str = "binary";
const CALENDAR: &str = "calendar";
const COMMON: &str = "common";

fn unit(key: &str, name: &str, symbol: &str, factor: f64, subgroup: &str) -> UnitDefinition {
    UnitDefinition::new(key, name, symbol, factor, subgroup)
}

pub(crate) fn builtin_registry() -> UnitRegistry {
    UnitRegistry::builder()
        .category(length())
        .category(weight())
        .category(temperature())
        .category(volume())
        .category(area())
        .category(speed())
        .category(time())
        .category(data())
        .category(energy())
        .category(pressure())
        .category(power())
        .category(angle())
        .build()
        .expect("built-in unit table is valid")
}

fn length() -> Category {
    Category::linear("length", "Length", "meter")
        .with_unit(unit("meter", "Meter", "m", 1.0, METRIC))
        .with_unit(unit("kilometer", "Kilometer", "km", 1000.0, METRIC))
        .with_unit(unit("centimeter", "Centimeter", "cm", 0.01, METRIC))
        .with_unit(unit("millimeter", "Millimeter", "mm", 0.001, METRIC))
        .with_unit(unit("micrometer", "Micrometer", "µm", 1e-6, METRIC))
        .with_unit(unit("nanometer", "Nanometer", "nm", 1e-9, METRIC))
        .with_unit(unit("mile", "Mile", "mi", 1609.344, IMPERIAL))
        .with_unit(unit("yard", "Yard", "yd", 0.9144, IMPERIAL))
        .with_unit(unit("foot", "Foot", "ft", 0.3048, IMPERIAL))
        .with_unit(unit("inch", "Inch", "in", 0.0254, IMPERIAL))
        .with_unit(unit("nauticalMile", "Nautical Mile", "nmi", 1852.0, NAUTICAL))
}

fn weight() -> Category {
    Category::linear("weight", "Weight", "kilogram")
        .with_unit(unit("kilogram", "Kilogram", "kg", 1.0, METRIC))
        .with_unit(unit("gram", "Gram", "g", 0.001, METRIC))
        .with_unit(unit("milligram", "Milligram", "mg", 1e-6, METRIC))
        .with_unit(unit("tonne", "Metric Ton", "t", 1000.0, METRIC))
        .with_unit(unit("pound", "Pound", "lb", 0.45359237, IMPERIAL))
        .with_unit(unit("ounce", "Ounce", "oz", 0.028349523125, IMPERIAL))
        .with_unit(unit("stone", "Stone", "st", 6.35029318, IMPERIAL))
        .with_unit(unit("usTon", "US Ton", "ton", 907.18474, IMPERIAL))
}

fn temperature() -> Category {
    Category::affine("temperature", "Temperature", temperature::CELSIUS, temperature::formulas())
        .with_unit(unit(temperature::CELSIUS, "Celsius", "°C", 1.0, METRIC))
        .with_unit(unit(temperature::FAHRENHEIT, "Fahrenheit", "°F", 1.0, IMPERIAL))
        .with_unit(unit(temperature::KELVIN, "Kelvin", "K", 1.0, SCIENTIFIC))
        .with_unit(unit(temperature::RANKINE, "Rankine", "°R", 1.0, SCIENTIFIC))
}

fn volume() -> Category {
    Category::linear("volume", "Volume", "liter")
        .with_unit(unit("liter", "Liter", "L", 1.0, METRIC))
        .with_unit(unit("milliliter", "Milliliter", "mL", 0.001, METRIC))
        .with_unit(unit("cubicMeter", "Cubic Meter", "m³", 1000.0, METRIC))
        .with_unit(unit("gallon", "US Gallon", "gal", 3.785411784, US))
        .with_unit(unit("quart", "US Quart", "qt", 0.946352946, US))
        .with_unit(unit("pint", "US Pint", "pt", 0.473176473, US))
        .with_unit(unit("cup", "US Cup", "cup", 0.2365882365, US))
        .with_unit(unit("fluidOunce", "US Fluid Ounce", "fl oz", 0.0295735295625, US))
        .with_unit(unit("tablespoon", "Tablespoon", "tbsp", 0.01478676478125, US))
        .with_unit(unit("teaspoon", "Teaspoon", "tsp", 0.00492892159375, US))
        .with_unit(unit("imperialGallon", "Imperial Gallon", "imp gal", 4.54609, IMPERIAL))
}

fn area() -> Category {
    Category::linear("area", "Area", "squareMeter")
        .with_unit(unit("squareMeter", "Square Meter", "m²", 1.0, METRIC))
        .with_unit(unit("squareKilometer", "Square Kilometer", "km²", 1e6, METRIC))
        .with_unit(unit("squareCentimeter", "Square Centimeter", "cm²", 1e-4, METRIC))
        .with_unit(unit("hectare", "Hectare", "ha", 1e4, METRIC))
        .with_unit(unit("squareMile", "Square Mile", "mi²", 2_589_988.110336, IMPERIAL))
        .with_unit(unit("acre", "Acre", "ac", 4046.8564224, IMPERIAL))
        .with_unit(unit("squareYard", "Square Yard", "yd²", 0.83612736, IMPERIAL))
        .with_unit(unit("squareFoot", "Square Foot", "ft²", 0.09290304, IMPERIAL))
        .with_unit(unit("squareInch", "Square Inch", "in²", 0.00064516, IMPERIAL))
}

fn speed() -> Category {
    Category::linear("speed", "Speed", "metersPerSecond")
        .with_unit(unit("metersPerSecond", "Meters per Second", "m/s", 1.0, METRIC))
        .with_unit(unit("kilometersPerHour", "Kilometers per Hour", "km/h", 1000.0 / 3600.0, METRIC))
        .with_unit(unit("milesPerHour", "Miles per Hour", "mph", 0.44704, IMPERIAL))
        .with_unit(unit("feetPerSecond", "Feet per Second", "ft/s", 0.3048, IMPERIAL))
        .with_unit(unit("knot", "Knot", "kn", 1852.0 / 3600.0, NAUTICAL))
}

fn time() -> Category {
    Category::linear("time", "Time", "second")
        .with_unit(unit("second", "Second", "s", 1.0, COMMON))
        .with_unit(unit("minute", "Minute", "min", 60.0, COMMON))
        .with_unit(unit("hour", "Hour", "h", 3600.0, COMMON))
        .with_unit(unit("millisecond", "Millisecond", "ms", 0.001, COMMON))
        .with_unit(unit("day", "Day", "d", 86_400.0, CALENDAR))
        .with_unit(unit("week", "Week", "wk", 604_800.0, CALENDAR))
        // Average Gregorian month and year
        .with_unit(unit("month", "Month", "mo", 2_629_746.0, CALENDAR))
        .with_unit(unit("year", "Year", "yr", 31_556_952.0, CALENDAR))
}

fn data() -> Category {
    Category::linear("data", "Digital Storage", "byte")
        .with_unit(unit("byte", "Byte", "B", 1.0, DECIMAL))
        .with_unit(unit("kilobyte", "Kilobyte", "kB", 1e3, DECIMAL))
        .with_unit(unit("megabyte", "Megabyte", "MB", 1e6, DECIMAL))
        .with_unit(unit("gigabyte", "Gigabyte", "GB", 1e9, DECIMAL))
        .with_unit(unit("terabyte", "Terabyte", "TB", 1e12, DECIMAL))
        .with_unit(unit("bit", "Bit", "bit", 0.125, DECIMAL))
        .with_unit(unit("kibibyte", "Kibibyte", "KiB", 1024.0, BINARY))
        .with_unit(unit("mebibyte", "Mebibyte", "MiB", 1_048_576.0, BINARY))
        .with_unit(unit("gibibyte", "Gibibyte", "GiB", 1_073_741_824.0, BINARY))
        .with_unit(unit("tebibyte", "Tebibyte", "TiB", 1_099_511_627_776.0, BINARY))
}

fn energy() -> Category {
    Category::linear("energy", "Energy", "joule")
        .with_unit(unit("joule", "Joule", "J", 1.0, METRIC))
        .with_unit(unit("kilojoule", "Kilojoule", "kJ", 1000.0, METRIC))
        .with_unit(unit("calorie", "Calorie", "cal", 4.184, METRIC))
        .with_unit(unit("kilocalorie", "Kilocalorie", "kcal", 4184.0, METRIC))
        .with_unit(unit("wattHour", "Watt Hour", "Wh", 3600.0, METRIC))
        .with_unit(unit("kilowattHour", "Kilowatt Hour", "kWh", 3.6e6, METRIC))
        .with_unit(unit("electronvolt", "Electronvolt", "eV", 1.602176634e-19, SCIENTIFIC))
        .with_unit(unit("btu", "British Thermal Unit", "BTU", 1055.05585262, IMPERIAL))
}

fn pressure() -> Category {
    Category::linear("pressure", "Pressure", "pascal")
        .with_unit(unit("pascal", "Pascal", "Pa", 1.0, METRIC))
        .with_unit(unit("kilopascal", "Kilopascal", "kPa", 1000.0, METRIC))
        .with_unit(unit("bar", "Bar", "bar", 1e5, METRIC))
        .with_unit(unit("atmosphere", "Atmosphere", "atm", 101_325.0, SCIENTIFIC))
        .with_unit(unit("torr", "Torr", "Torr", 101_325.0 / 760.0, SCIENTIFIC))
        .with_unit(unit("mmHg", "Millimeter of Mercury", "mmHg", 133.322387415, SCIENTIFIC))
        .with_unit(unit("psi", "Pound per Square Inch", "psi", 6894.757293168, IMPERIAL))
}

fn power() -> Category {
    Category::linear("power", "Power", "watt")
        .with_unit(unit("watt", "Watt", "W", 1.0, METRIC))
        .with_unit(unit("kilowatt", "Kilowatt", "kW", 1000.0, METRIC))
        .with_unit(unit("megawatt", "Megawatt", "MW", 1e6, METRIC))
        .with_unit(unit("horsepower", "Horsepower", "hp", 745.699_871_582_270_2, IMPERIAL))
        .with_unit(unit("btuPerHour", "BTU per Hour", "BTU/h", 0.29307107017, IMPERIAL))
}

fn angle() -> Category {
    Category::linear("angle", "Angle", "degree")
        .with_unit(unit("degree", "Degree", "°", 1.0, COMMON))
        .with_unit(unit("radian", "Radian", "rad", 180.0 / std::f64::consts::PI, COMMON))
        .with_unit(unit("gradian", "Gradian", "grad", 0.9, COMMON))
        .with_unit(unit("arcminute", "Arcminute", "′", 1.0 / 60.0, COMMON))
        .with_unit(unit("arcsecond", "Arcsecond", "″", 1.0 / 3600.0, COMMON))
        .with_unit(unit("turn", "Turn", "tr", 360.0, COMMON))
}
