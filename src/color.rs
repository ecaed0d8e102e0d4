use crate::error::Error;
use crate::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RGBColorFormat<T> {
    pub red: T,
    pub green: T,
    pub blue: T,
}

/// A color read from a source whose components range over `0..=max`.
pub struct RangeColorFormat<T> {
    max: T,
    red: T,
    green: T,
    blue: T,
}

impl<T> RGBColorFormat<T> {
    pub fn new(red: T, green: T, blue: T) -> Self {
        RGBColorFormat { red, green, blue }
    }
}

impl RangeColorFormat<u16> {
    pub fn new(max: u16, red: u16, green: u16, blue: u16) -> Result<Self> {
        for component in [red, green, blue] {
            if component > max {
                return Err(Error::ColorComponentExceedsMaximum(component, max));
            }
        }
        Ok(RangeColorFormat {
            max,
            red,
            green,
            blue,
        })
    }

    fn scale_component(&self, component: u16) -> u8 {
        if self.max == 0 {
            return 0;
        }
        let max = self.max as u32;
        ((component as u32 * 255 + max / 2) / max) as u8
    }
}

impl From<&RangeColorFormat<u16>> for RGBColorFormat<u8> {
    fn from(value: &RangeColorFormat<u16>) -> Self {
        RGBColorFormat {
            red: value.scale_component(value.red),
            green: value.scale_component(value.green),
            blue: value.scale_component(value.blue),
        }
    }
}

impl From<RangeColorFormat<u16>> for RGBColorFormat<u8> {
    fn from(value: RangeColorFormat<u16>) -> Self {
        RGBColorFormat::from(&value)
    }
}

/// Renders colors as `#RRGGBB`, or `#RGB` when every channel repeats its digit.
pub struct HexColorEncoder;

impl HexColorEncoder {
    /// Encodes loosely typed channel values, rejecting anything outside `0..=255`.
    pub fn encode(red: i64, green: i64, blue: i64) -> Result<String> {
        let red = Self::checked_channel("red", red)?;
        let green = Self::checked_channel("green", green)?;
        let blue = Self::checked_channel("blue", blue)?;
        Ok(Self::encode_rgb(&RGBColorFormat { red, green, blue }))
    }

    pub fn encode_rgb(color: &RGBColorFormat<u8>) -> String {
        let digits = format!("{:02X}{:02X}{:02X}", color.red, color.green, color.blue);
        format!("#{}", Self::shorten(&digits))
    }

    fn checked_channel(channel: &'static str, value: i64) -> Result<u8> {
        u8::try_from(value).map_err(|_| Error::ColorChannelOutOfRange(channel, value))
    }

    fn shorten(digits: &str) -> String {
        let bytes = digits.as_bytes();
        if bytes[0] == bytes[1] && bytes[2] == bytes[3] && bytes[4] == bytes[5] {
            return [bytes[0], bytes[2], bytes[4]]
                .iter()
                .map(|&b| b as char)
                .collect();
        }
        digits.to_owned()
    }
}

#[cfg(test)]
mod test {
    use super::{HexColorEncoder, RGBColorFormat, RangeColorFormat};
    use crate::error::{Error, ErrorKind};

    #[test]
    fn collapse_repeated_channel_digits() {
        assert_eq!(HexColorEncoder::encode(0xAA, 0xBB, 0xCC).unwrap(), "#ABC");
    }

    #[test]
    fn keep_mismatched_channel_digits() {
        assert_eq!(HexColorEncoder::encode(0xAB, 0xBC, 0xCD).unwrap(), "#ABBCCD");
    }

    #[test]
    fn alternating_digits_do_not_collapse() {
        assert_eq!(HexColorEncoder::encode(0xAB, 0xAB, 0xAB).unwrap(), "#ABABAB");
    }

    #[test]
    fn single_mismatched_channel_prevents_shorthand() {
        assert_eq!(HexColorEncoder::encode(0x11, 0x22, 0x34).unwrap(), "#112234");
    }

    #[test]
    fn encode_black_and_white() {
        assert_eq!(HexColorEncoder::encode(0, 0, 0).unwrap(), "#000");
        assert_eq!(HexColorEncoder::encode(255, 255, 255).unwrap(), "#FFF");
    }

    #[test]
    fn digits_are_zero_padded_and_uppercase() {
        let color = RGBColorFormat::new(0x0a, 0xf0, 0x5b);
        assert_eq!(HexColorEncoder::encode_rgb(&color), "#0AF05B");
    }

    #[test]
    fn reject_out_of_range_channels() {
        for (red, green, blue) in [(256, 0, 0), (0, -1, 0), (0, 0, 1000)] {
            let result = HexColorEncoder::encode(red, green, blue);
            match result {
                Err(error) => assert_eq!(error.kind(), ErrorKind::InvalidArgument),
                Ok(color) => panic!("Out of range channel accepted as {}", color),
            }
        }
    }

    #[test]
    fn out_of_range_error_names_the_channel() {
        if let Err(Error::ColorChannelOutOfRange(channel, value)) =
            HexColorEncoder::encode(0, 300, 0)
        {
            assert_eq!(channel, "green");
            assert_eq!(value, 300);
            return;
        }
        panic!("Out of range green channel not detected");
    }

    #[test]
    fn convert_range_color_to_rgb() {
        let range_color = RangeColorFormat::new(15, 0, 15, 8).unwrap();
        let result = RGBColorFormat::from(&range_color);
        assert_eq!(result, RGBColorFormat::new(0, 255, 136));
    }

    #[test]
    fn convert_full_range_color_unchanged() {
        let range_color = RangeColorFormat::new(255, 12, 200, 255).unwrap();
        let result = RGBColorFormat::from(range_color);
        assert_eq!(result, RGBColorFormat::new(12, 200, 255));
    }

    #[test]
    fn create_range_color_out_of_range() {
        let result = RangeColorFormat::new(144, 12, 144, 145);
        assert!(matches!(
            result,
            Err(Error::ColorComponentExceedsMaximum(145, 144))
        ));
    }
}
