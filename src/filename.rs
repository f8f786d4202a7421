use chrono::NaiveDate;

use crate::error::DecodeError;
use crate::types::{Channel, ImageRecord};

impl Channel {
    pub const ALL: [Channel; 19] = [
        Channel::Aia0193,
        Channel::Aia0304,
        Channel::Aia0171,
        Channel::Aia0211,
        Channel::Aia0131,
        Channel::Aia0335,
        Channel::Aia0094,
        Channel::Aia1600,
        Channel::Aia1700,
        Channel::Aia211193171,
        Channel::Aia304211171,
        Channel::Aia094335193,
        Channel::Aia171Hmib,
        Channel::HmiMagnetogram,
        Channel::HmiColorizedMagnetogram,
        Channel::HmiIntensitygramColored,
        Channel::HmiIntensitygramFlattened,
        Channel::HmiIntensitygram,
        Channel::HmiDopplergram,
    ];

    /// The token the archive embeds in filenames for this channel.
    pub fn token(self) -> &'static str {
        match self {
            Channel::Aia0193 => "0193",
            Channel::Aia0304 => "0304",
            Channel::Aia0171 => "0171",
            Channel::Aia0211 => "0211",
            Channel::Aia0131 => "0131",
            Channel::Aia0335 => "0335",
            Channel::Aia0094 => "0094",
            Channel::Aia1600 => "1600",
            Channel::Aia1700 => "1700",
            Channel::Aia211193171 => "211193171",
            Channel::Aia304211171 => "304211171",
            Channel::Aia094335193 => "094335193",
            Channel::Aia171Hmib => "HMI171",
            Channel::HmiMagnetogram => "HMIB",
            Channel::HmiColorizedMagnetogram => "HMIBC",
            Channel::HmiIntensitygramColored => "HMIIC",
            Channel::HmiIntensitygramFlattened => "HMIIF",
            Channel::HmiIntensitygram => "HMII",
            Channel::HmiDopplergram => "HMID",
        }
    }

    /// Looks up the channel for a filename token. Unknown tokens yield `None`
    /// so future channel codes cannot slip through as some default.
    pub fn from_token(token: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|c| c.token() == token)
    }
}

impl ImageRecord {
    /// Decodes a listing entry of the form `YYYYMMDD_hhmmss_RRRR_CCCC.jpg`.
    ///
    /// The grammar is strict: a mandatory `.jpg` suffix, exactly four
    /// underscore-separated segments, an 8-digit calendar date, a 6-digit
    /// time of day, a positive resolution and a recognized channel token.
    /// Anything else fails with a [`DecodeError`] carrying the entry.
    pub fn decode(entry: &str) -> Result<ImageRecord, DecodeError> {
        parse(entry).ok_or_else(|| DecodeError {
            entry: entry.to_string(),
        })
    }
}

fn parse(entry: &str) -> Option<ImageRecord> {
    let stem = entry.strip_suffix(".jpg")?;
    let mut segments = stem.split('_');
    let date = segments.next()?;
    let time = segments.next()?;
    let resolution = segments.next()?;
    let channel = segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if time.len() != 6 || !time.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let timestamp = NaiveDate::from_ymd_opt(
        date[..4].parse().ok()?,
        date[4..6].parse().ok()?,
        date[6..].parse().ok()?,
    )?
    .and_hms_opt(
        time[..2].parse().ok()?,
        time[2..4].parse().ok()?,
        time[4..].parse().ok()?,
    )?;

    let resolution: u32 = resolution.parse().ok()?;
    if resolution == 0 {
        return None;
    }

    Some(ImageRecord {
        filename: entry.to_string(),
        timestamp,
        resolution,
        channel: Channel::from_token(channel)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn decodes_valid_filenames() {
        let cases = [
            (
                "20231020_205317_1024_1700.jpg",
                ts(2023, 10, 20, 20, 53, 17),
                1024,
                Channel::Aia1700,
            ),
            (
                "20231020_005238_1024_HMII.jpg",
                ts(2023, 10, 20, 0, 52, 38),
                1024,
                Channel::HmiIntensitygram,
            ),
            (
                "20231020_061705_512_0193.jpg",
                ts(2023, 10, 20, 6, 17, 5),
                512,
                Channel::Aia0193,
            ),
            (
                "20231020_150050_4096_0335.jpg",
                ts(2023, 10, 20, 15, 0, 50),
                4096,
                Channel::Aia0335,
            ),
            (
                "20231020_170511_512_094335193.jpg",
                ts(2023, 10, 20, 17, 5, 11),
                512,
                Channel::Aia094335193,
            ),
            (
                "20231020_000000_2048_HMIIF.jpg",
                ts(2023, 10, 20, 0, 0, 0),
                2048,
                Channel::HmiIntensitygramFlattened,
            ),
            (
                "20231020_220000_3072_HMIBC.jpg",
                ts(2023, 10, 20, 22, 0, 0),
                3072,
                Channel::HmiColorizedMagnetogram,
            ),
            (
                "20120213_235957_1024_0304.jpg",
                ts(2012, 2, 13, 23, 59, 57),
                1024,
                Channel::Aia0304,
            ),
        ];

        for (entry, timestamp, resolution, channel) in cases {
            let record = ImageRecord::decode(entry).unwrap();
            assert_eq!(
                record,
                ImageRecord {
                    filename: entry.to_string(),
                    timestamp,
                    resolution,
                    channel,
                },
                "entry {entry}"
            );
        }
    }

    #[test]
    fn rejects_malformed_filenames() {
        let bad = [
            // wrong extension / missing suffix
            "20231020_205317_1024_1700.png",
            "20231020_205317_1024_1700",
            // wrong segment count
            "20231020_205317_1024.jpg",
            "20231020_205317_1024_1700_extra.jpg",
            // date / time shape
            "2023102_205317_1024_1700.jpg",
            "202310200_205317_1024_1700.jpg",
            "20231020_20531_1024_1700.jpg",
            "2023102a_205317_1024_1700.jpg",
            // out-of-range calendar values
            "20231399_205317_1024_1700.jpg",
            "20231020_256060_1024_1700.jpg",
            // resolution
            "20231020_205317_10x4_1700.jpg",
            "20231020_205317_0_1700.jpg",
            // unknown channel token
            "20231020_205317_1024_XXXX.jpg",
            "20231020_205317_1024_hmib.jpg",
        ];

        for entry in bad {
            let err = ImageRecord::decode(entry).unwrap_err();
            assert_eq!(err.entry, entry);
        }
    }

    #[test]
    fn tokens_round_trip() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_token(channel.token()), Some(channel));
        }
        assert_eq!(Channel::from_token("9999"), None);
    }
}
