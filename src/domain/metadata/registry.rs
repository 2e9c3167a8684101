// SPDX-License-Identifier: MPL-2.0
//! Static EXIF/TIFF and GPS tag registries.
//!
//! Both tables are sorted by tag ID so lookups can binary search. GPS names
//! are stored without the `GPS` prefix because they only ever appear inside
//! the `GPSInfo` sub-table.

use super::tags::{RawTagTable, RawValue, TagKey, TagTable, TagValue};

/// Tag ID of the GPS IFD pointer; its resolved value is the GPS sub-table.
pub const GPS_INFO: u16 = 0x8825;

/// Registry name of [`GPS_INFO`].
pub const GPS_INFO_NAME: &str = "GPSInfo";

/// TIFF (IFD0) and EXIF sub-IFD tags.
pub const EXIF_TAGS: &[(u16, &str)] = &[
    (0x000B, "ProcessingSoftware"),
    (0x00FE, "NewSubfileType"),
    (0x00FF, "SubfileType"),
    (0x0100, "ImageWidth"),
    (0x0101, "ImageLength"),
    (0x0102, "BitsPerSample"),
    (0x0103, "Compression"),
    (0x0106, "PhotometricInterpretation"),
    (0x010A, "FillOrder"),
    (0x010D, "DocumentName"),
    (0x010E, "ImageDescription"),
    (0x010F, "Make"),
    (0x0110, "Model"),
    (0x0111, "StripOffsets"),
    (0x0112, "Orientation"),
    (0x0115, "SamplesPerPixel"),
    (0x0116, "RowsPerStrip"),
    (0x0117, "StripByteCounts"),
    (0x011A, "XResolution"),
    (0x011B, "YResolution"),
    (0x011C, "PlanarConfiguration"),
    (0x0128, "ResolutionUnit"),
    (0x012D, "TransferFunction"),
    (0x0131, "Software"),
    (0x0132, "DateTime"),
    (0x013B, "Artist"),
    (0x013C, "HostComputer"),
    (0x013E, "WhitePoint"),
    (0x013F, "PrimaryChromaticities"),
    (0x0201, "JpegIFOffset"),
    (0x0202, "JpegIFByteCount"),
    (0x0211, "YCbCrCoefficients"),
    (0x0212, "YCbCrSubSampling"),
    (0x0213, "YCbCrPositioning"),
    (0x0214, "ReferenceBlackWhite"),
    (0x02BC, "XMLPacket"),
    (0x4746, "Rating"),
    (0x4749, "RatingPercent"),
    (0x8298, "Copyright"),
    (0x829A, "ExposureTime"),
    (0x829D, "FNumber"),
    (0x83BB, "IptcNAA"),
    (0x8769, "ExifOffset"),
    (0x8773, "InterColorProfile"),
    (0x8822, "ExposureProgram"),
    (0x8824, "SpectralSensitivity"),
    (GPS_INFO, GPS_INFO_NAME),
    (0x8827, "ISOSpeedRatings"),
    (0x8828, "OECF"),
    (0x8830, "SensitivityType"),
    (0x8831, "StandardOutputSensitivity"),
    (0x8832, "RecommendedExposureIndex"),
    (0x8833, "ISOSpeed"),
    (0x9000, "ExifVersion"),
    (0x9003, "DateTimeOriginal"),
    (0x9004, "DateTimeDigitized"),
    (0x9010, "OffsetTime"),
    (0x9011, "OffsetTimeOriginal"),
    (0x9012, "OffsetTimeDigitized"),
    (0x9101, "ComponentsConfiguration"),
    (0x9102, "CompressedBitsPerPixel"),
    (0x9201, "ShutterSpeedValue"),
    (0x9202, "ApertureValue"),
    (0x9203, "BrightnessValue"),
    (0x9204, "ExposureBiasValue"),
    (0x9205, "MaxApertureValue"),
    (0x9206, "SubjectDistance"),
    (0x9207, "MeteringMode"),
    (0x9208, "LightSource"),
    (0x9209, "Flash"),
    (0x920A, "FocalLength"),
    (0x9214, "SubjectArea"),
    (0x927C, "MakerNote"),
    (0x9286, "UserComment"),
    (0x9290, "SubsecTime"),
    (0x9291, "SubsecTimeOriginal"),
    (0x9292, "SubsecTimeDigitized"),
    (0x9400, "AmbientTemperature"),
    (0x9401, "Humidity"),
    (0x9402, "Pressure"),
    (0x9403, "WaterDepth"),
    (0x9404, "Acceleration"),
    (0x9405, "CameraElevationAngle"),
    (0x9C9B, "XPTitle"),
    (0x9C9C, "XPComment"),
    (0x9C9D, "XPAuthor"),
    (0x9C9E, "XPKeywords"),
    (0x9C9F, "XPSubject"),
    (0xA000, "FlashPixVersion"),
    (0xA001, "ColorSpace"),
    (0xA002, "ExifImageWidth"),
    (0xA003, "ExifImageHeight"),
    (0xA004, "RelatedSoundFile"),
    (0xA005, "ExifInteroperabilityOffset"),
    (0xA20B, "FlashEnergy"),
    (0xA20C, "SpatialFrequencyResponse"),
    (0xA20E, "FocalPlaneXResolution"),
    (0xA20F, "FocalPlaneYResolution"),
    (0xA210, "FocalPlaneResolutionUnit"),
    (0xA214, "SubjectLocation"),
    (0xA215, "ExposureIndex"),
    (0xA217, "SensingMethod"),
    (0xA300, "FileSource"),
    (0xA301, "SceneType"),
    (0xA302, "CFAPattern"),
    (0xA401, "CustomRendered"),
    (0xA402, "ExposureMode"),
    (0xA403, "WhiteBalance"),
    (0xA404, "DigitalZoomRatio"),
    (0xA405, "FocalLengthIn35mmFilm"),
    (0xA406, "SceneCaptureType"),
    (0xA407, "GainControl"),
    (0xA408, "Contrast"),
    (0xA409, "Saturation"),
    (0xA40A, "Sharpness"),
    (0xA40B, "DeviceSettingDescription"),
    (0xA40C, "SubjectDistanceRange"),
    (0xA420, "ImageUniqueID"),
    (0xA430, "CameraOwnerName"),
    (0xA431, "BodySerialNumber"),
    (0xA432, "LensSpecification"),
    (0xA433, "LensMake"),
    (0xA434, "LensModel"),
    (0xA435, "LensSerialNumber"),
    (0xA460, "CompositeImage"),
    (0xA500, "Gamma"),
    (0xC4A5, "PrintImageMatching"),
    (0xC612, "DNGVersion"),
    (0xC613, "DNGBackwardVersion"),
    (0xEA1C, "Padding"),
    (0xEA1D, "OffsetSchema"),
];

/// GPS IFD tags (complete registry, IDs 0 to 31).
pub const GPS_TAGS: &[(u16, &str)] = &[
    (0, "VersionID"),
    (1, "LatitudeRef"),
    (2, "Latitude"),
    (3, "LongitudeRef"),
    (4, "Longitude"),
    (5, "AltitudeRef"),
    (6, "Altitude"),
    (7, "TimeStamp"),
    (8, "Satellites"),
    (9, "Status"),
    (10, "MeasureMode"),
    (11, "DOP"),
    (12, "SpeedRef"),
    (13, "Speed"),
    (14, "TrackRef"),
    (15, "Track"),
    (16, "ImgDirectionRef"),
    (17, "ImgDirection"),
    (18, "MapDatum"),
    (19, "DestLatitudeRef"),
    (20, "DestLatitude"),
    (21, "DestLongitudeRef"),
    (22, "DestLongitude"),
    (23, "DestBearingRef"),
    (24, "DestBearing"),
    (25, "DestDistanceRef"),
    (26, "DestDistance"),
    (27, "ProcessingMethod"),
    (28, "AreaInformation"),
    (29, "DateStamp"),
    (30, "Differential"),
    (31, "HPositioningError"),
];

fn lookup(table: &[(u16, &'static str)], id: u16) -> Option<&'static str> {
    table
        .binary_search_by_key(&id, |(tag, _)| *tag)
        .ok()
        .map(|index| table[index].1)
}

/// Name of a TIFF/EXIF tag ID.
#[must_use]
pub fn exif_tag_name(id: u16) -> Option<&'static str> {
    lookup(EXIF_TAGS, id)
}

/// Name of a GPS tag ID.
#[must_use]
pub fn gps_tag_name(id: u16) -> Option<&'static str> {
    lookup(GPS_TAGS, id)
}

/// Resolves every raw tag ID to its registry name.
///
/// Unknown IDs are kept as [`TagKey::Id`]. The sub-table stored under
/// [`GPS_INFO`] is resolved against the GPS registry; any other nested
/// table uses the EXIF registry.
pub(crate) fn resolve(raw: &RawTagTable) -> TagTable {
    resolve_with(raw, exif_tag_name)
}

fn resolve_with(raw: &RawTagTable, names: fn(u16) -> Option<&'static str>) -> TagTable {
    let mut resolved = TagTable::new();
    for (&id, value) in raw.iter() {
        let key = names(id).map_or(TagKey::Id(id), TagKey::Name);
        let value = match value {
            RawValue::Value(value) => value.clone(),
            RawValue::SubTable(table) if id == GPS_INFO => {
                TagValue::Table(resolve_with(table, gps_tag_name))
            }
            RawValue::SubTable(table) => TagValue::Table(resolve_with(table, exif_tag_name)),
        };
        resolved.insert(key, value);
    }
    resolved
}
