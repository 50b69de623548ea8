//! CSS colors

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use super::kind_mismatch;
use crate::diagnostic::Diagnostic;
use crate::dispatch::ValidationContext;
use crate::path::KeyPath;
use crate::registry::TypeValidator;
use crate::spec::SpecNode;

const NAMED_COLORS: &[&str] = &[
    "transparent", "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque",
    "black", "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue",
    "chartreuse", "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan",
    "darkblue", "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo", "ivory",
    "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral",
    "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink",
    "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey",
    "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon",
    "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen",
    "mediumslateblue", "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue",
    "mintcream", "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab",
    "orange", "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise",
    "palevioletred", "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple",
    "rebeccapurple", "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown",
    "seagreen", "seashell", "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey",
    "snow", "springgreen", "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet",
    "wheat", "white", "whitesmoke", "yellow", "yellowgreen",
];

fn hex_color() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^#([0-9a-f]{3}|[0-9a-f]{4}|[0-9a-f]{6}|[0-9a-f]{8})$").expect("hex color pattern")
    })
}

fn functional_color() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(rgba?|hsla?)\((.*)\)$").expect("functional color pattern")
    })
}

fn component() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)%?$").expect("color component pattern"))
}

/// Whether `input` is a CSS color
pub fn is_css_color(input: &str) -> bool {
    let color = input.trim().to_ascii_lowercase();

    if NAMED_COLORS.contains(&color.as_str()) || hex_color().is_match(&color) {
        return true;
    }

    let Some(captures) = functional_color().captures(&color) else {
        return false;
    };
    let function = &captures[1];
    let args: Vec<&str> = captures[2].split(',').map(str::trim).collect();

    let expected = if function.ends_with('a') { 4 } else { 3 };
    if args.len() != expected || !args.iter().all(|a| component().is_match(a)) {
        return false;
    }

    match function {
        // hue is a plain number, saturation and lightness are percentages
        "hsl" | "hsla" => !args[0].ends_with('%') && args[1].ends_with('%') && args[2].ends_with('%'),
        _ => true,
    }
}

pub struct ColorValidator;

impl TypeValidator for ColorValidator {
    fn validate(&self, _cx: &ValidationContext<'_>, value: &Value, _node: SpecNode<'_>, path: &KeyPath) -> Vec<Diagnostic> {
        let Value::String(color) = value else {
            return vec![kind_mismatch(path, value, "color")];
        };
        if is_css_color(color) {
            return Vec::new();
        }
        vec![Diagnostic::format(path, Some(value), "color expected, \"%s\" found", &[color])]
    }
}
