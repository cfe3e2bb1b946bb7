//! Settings defaults: the document written on bootstrap and on reset.
//!
//! Every value is a string, booleans included ("True"/"False"); consumers parse
//! what they need.

use serde_json::Value;

use crate::SettingsDocument;

/// Default API port.
pub const DEFAULT_API_PORT: &str = "15372";

/// Every recognized setting with its default value.
pub static DEFAULT_SETTINGS: &[(&str, &str)] = &[
    // API
    ("api_port", DEFAULT_API_PORT),
    ("enable_api", "True"),
    // PT-Gen
    ("pt_gen_api_url", "https://ptgen.agsvpt.work/"),
    ("pt_gen_api_url_backup", "https://ptgen.agsvpt.work/"),
    // Image hosting
    ("picture_bed_api_url", "https://freeimage.host/api/1/upload"),
    ("picture_bed_api_token", "6d207e02198a847aa98d0a2a901485a5"),
    // Screenshots
    ("screenshot_storage_path", "temp/pic"),
    ("screenshot_number", "3"),
    ("screenshot_threshold", "30.0"),
    ("screenshot_start_percentage", "0.10"),
    ("screenshot_end_percentage", "0.90"),
    ("auto_upload_screenshot", "True"),
    ("paste_screenshot_url", "True"),
    ("delete_screenshot", "True"),
    // Thumbnails
    ("do_get_thumbnail", "True"),
    ("thumbnail_rows", "3"),
    ("thumbnail_cols", "3"),
    ("thumbnail_delay", "2.0"),
    // File management
    ("torrent_storage_path", "temp/torrent"),
    ("media_info_suffix", "True"),
    ("make_dir", "True"),
    ("rename_file", "True"),
    ("create_hard_link", "True"),
    ("second_confirm_file_name", "True"),
    // Naming templates: movies
    (
        "main_title_movie",
        "{en_title} {year} {video_format} {source} {video_codec} {bit_depth} {hdr_format} {frame_rate} {audio_codec} {channels} {audio_num}-{team}",
    ),
    (
        "second_title_movie",
        "{original_title} / {other_titles} | 类型：{categories} | 演员：{actors}",
    ),
    (
        "file_name_movie",
        "{original_title}.{en_title}.{year}.{video_format}.{source}.{video_codec}.{bit_depth}.{hdr_format}.{frame_rate}.{audio_codec}.{channels}.{audio_num}-{team}",
    ),
    // Naming templates: TV
    (
        "main_title_tv",
        "{en_title} S{season} {year} {video_format} {source} {video_codec} {bit_depth} {hdr_format} {frame_rate} {audio_codec} {channels} {audio_num}-{team}",
    ),
    (
        "second_title_tv",
        "{original_title} / {other_titles} | {total_episodes} | 类型：{categories} | 演员：{actors}",
    ),
    (
        "file_name_tv",
        "{original_title}.{en_title}.S{season}E{episode}.{year}.{video_format}.{source}.{video_codec}.{bit_depth}.{hdr_format}.{frame_rate}.{audio_codec}.{channels}.{audio_num}-{team}",
    ),
    // Naming templates: playlets
    (
        "main_title_playlet",
        "{en_title} S{season} {year} {video_format} {source} {video_codec} {bit_depth} {hdr_format} {frame_rate} {audio_codec} {channels} {audio_num}-{team}",
    ),
    (
        "second_title_playlet",
        "{original_title} | {total_episodes} | {year}年 | {playlet_source} | 类型：{categories}",
    ),
    (
        "file_name_playlet",
        "{original_title}.{en_title}.S{season}E{episode}.{year}.{video_format}.{source}.{video_codec}.{bit_depth}.{hdr_format}.{frame_rate}.{audio_codec}.{channels}.{audio_num}-{team}",
    ),
    // Auto feed
    ("auto_feed_link", AUTO_FEED_LINK),
    ("open_auto_feed_link", "True"),
    // Personalization
    ("personalized_signature", ""),
];

const AUTO_FEED_LINK: &str = concat!(
    "https://example.com/upload.php#separator#",
    "name#linkstr#{主标题}#linkstr#",
    "small_descr#linkstr#{副标题}#linkstr#",
    "url#linkstr#{IMDB}#linkstr#",
    "dburl#linkstr#{豆瓣}#linkstr#",
    "descr#linkstr#{简介}[quote]{MediaInfo}[/quote]#linkstr#",
    "log_info#linkstr##linkstr#",
    "tracklist#linkstr##linkstr#",
    "music_type#linkstr##linkstr#",
    "music_media#linkstr##linkstr#",
    "edition_info#linkstr##linkstr#",
    "music_name#linkstr##linkstr#",
    "music_author#linkstr##linkstr#",
    "animate_info#linkstr##linkstr#",
    "anidb#linkstr##linkstr#",
    "torrentName#linkstr##linkstr#",
    "images#linkstr##linkstr#",
    "torrent_name#linkstr#{种子名称}#linkstr#",
    "torrent_url#linkstr#{种子链接}#linkstr#",
    "type#linkstr#{类型}#linkstr#",
    "source_sel#linkstr#{地区}#linkstr#",
    "standard_sel#linkstr#{分辨率}#linkstr#",
    "audiocodec_sel#linkstr#{音频编码}#linkstr#",
    "codec_sel#linkstr#{视频编码}#linkstr#",
    "medium_sel#linkstr#{媒介}#linkstr#",
    "origin_site#linkstr#{小组}#linkstr#",
    "origin_url#linkstr##linkstr#",
    "golden_torrent#linkstr#false#linkstr#",
    "mediainfo_cmct#linkstr##linkstr#",
    "imgs_cmct#linkstr##linkstr#",
    "full_mediainfo#linkstr##linkstr#",
    "subtitles#linkstr##linkstr#",
    "youtube_url#linkstr##linkstr#",
    "ptp_poster#linkstr##linkstr#",
    "comparisons#linkstr##linkstr#",
    "version_info#linkstr##linkstr#",
    "multi_mediainfo#linkstr##linkstr#",
    "labels#linkstr#0",
);

/// Build the canonical default document.
pub fn defaults() -> SettingsDocument {
    DEFAULT_SETTINGS
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect()
}

/// Default value for a recognized key.
pub fn default_value(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

pub fn is_default_key(key: &str) -> bool {
    default_value(key).is_some()
}
