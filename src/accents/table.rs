//! Accent data per character set

type Glyphs = &'static [&'static str];

pub(super) fn bg(c: char) -> Glyphs {
    match c {
        'i' => &["й"],
        _ => &[],
    }
}

pub(super) fn ca(c: char) -> Glyphs {
    match c {
        'a' => &["à", "á"],
        'c' => &["ç"],
        'e' => &["è", "é", "€"],
        'i' => &["ì", "í", "ï"],
        'n' => &["ñ"],
        'o' => &["ò", "ó"],
        'u' => &["ù", "ú", "ü"],
        'l' => &["·"],
        ',' => &["¿", "?", "¡", "!", "«", "»", "\"", "\"", "'", "'"],
        _ => &[],
    }
}

pub(super) fn crh(c: char) -> Glyphs {
    match c {
        'a' => &["â"],
        'c' => &["ç"],
        'e' => &["€"],
        'g' => &["ğ"],
        'h' => &["₴"],
        'i' => &["ı", "İ"],
        'n' => &["ñ"],
        'o' => &["ö"],
        's' => &["ş"],
        't' => &["₺"],
        'u' => &["ü"],
        _ => &[],
    }
}

pub(super) fn cur(c: char) -> Glyphs {
    match c {
        'b' => &["฿", "в"],
        'c' => &["¢", "₡", "č"],
        'd' => &["₫"],
        'e' => &["€"],
        'f' => &["ƒ"],
        'h' => &["₴"],
        'k' => &["₭"],
        'l' => &["ł"],
        'n' => &["л"],
        'm' => &["₼"],
        'p' => &["£", "₽"],
        'r' => &["₹", "៛", "﷼"],
        's' => &["$", "₪"],
        't' => &["₮", "₺", "₸"],
        'w' => &["₩"],
        'y' => &["¥"],
        'z' => &["z"],
        _ => &[],
    }
}

pub(super) fn cy(c: char) -> Glyphs {
    match c {
        'a' => &["â", "ä", "à", "á"],
        'e' => &["ê", "ë", "è", "é"],
        'i' => &["î", "ï", "ì", "í"],
        'o' => &["ô", "ö", "ò", "ó"],
        'p' => &["£"],
        'u' => &["û", "ü", "ù", "ú"],
        'y' => &["ŷ", "ÿ", "ỳ", "ý"],
        'w' => &["ŵ", "ẅ", "ẁ", "ẃ"],
        ',' => &["'", "'", "\"", "\""],
        _ => &[],
    }
}

pub(super) fn cz(c: char) -> Glyphs {
    match c {
        'a' => &["á"],
        'c' => &["č"],
        'd' => &["ď"],
        'e' => &["ě", "é"],
        'i' => &["í"],
        'n' => &["ň"],
        'o' => &["ó"],
        'r' => &["ř"],
        's' => &["š"],
        't' => &["ť"],
        'u' => &["ů", "ú"],
        'y' => &["ý"],
        'z' => &["ž"],
        ',' => &["„", "\"", "‚", "'", "»", "«", "›", "‹"],
        _ => &[],
    }
}

pub(super) fn dk(c: char) -> Glyphs {
    match c {
        'a' => &["å", "æ"],
        'e' => &["€"],
        'o' => &["ø"],
        ',' => &["»", "«", "\"", "\"", "›", "‹", "'", "'"],
        _ => &[],
    }
}

pub(super) fn epo(c: char) -> Glyphs {
    match c {
        'c' => &["ĉ"],
        'g' => &["ĝ"],
        'h' => &["ĥ"],
        'j' => &["ĵ"],
        's' => &["ŝ"],
        'u' => &["ŭ"],
        _ => &[],
    }
}

pub(super) fn est(c: char) -> Glyphs {
    match c {
        'a' => &["ä"],
        'e' => &["€"],
        'o' => &["ö", "õ"],
        'u' => &["ü"],
        'z' => &["ž"],
        's' => &["š"],
        ',' => &["„", "\"", "«", "»"],
        _ => &[],
    }
}

pub(super) fn fi(c: char) -> Glyphs {
    match c {
        'a' => &["ä", "å"],
        'e' => &["€"],
        'o' => &["ö"],
        ',' => &["\"", "'", "»"],
        _ => &[],
    }
}

pub(super) fn fr(c: char) -> Glyphs {
    match c {
        'a' => &["à", "â", "á", "ä", "ã", "æ"],
        'c' => &["ç"],
        'e' => &["é", "è", "ê", "ë", "€"],
        'i' => &["î", "ï", "í", "ì"],
        'o' => &["ô", "ö", "ó", "ò", "õ", "œ"],
        'u' => &["û", "ù", "ü", "ú"],
        'y' => &["ÿ", "ý"],
        ',' => &["«", "»", "‹", "›", "\"", "\"", "'", "'"],
        _ => &[],
    }
}

pub(super) fn ga(c: char) -> Glyphs {
    match c {
        'a' => &["á"],
        'e' => &["é", "€"],
        'i' => &["í"],
        'o' => &["ó"],
        'u' => &["ú"],
        ',' => &["\"", "\"", "'", "'"],
        _ => &[],
    }
}

pub(super) fn gd(c: char) -> Glyphs {
    match c {
        'a' => &["à"],
        'e' => &["è"],
        'i' => &["ì"],
        'o' => &["ò"],
        'p' => &["£"],
        'u' => &["ù"],
        ',' => &["\"", "\"", "'", "'"],
        _ => &[],
    }
}

pub(super) fn de(c: char) -> Glyphs {
    match c {
        'a' => &["ä"],
        'e' => &["€"],
        'o' => &["ö"],
        's' => &["ß"],
        'u' => &["ü"],
        ',' => &["„", "\"", ".", "'", "»", "«", "›", "‹"],
        _ => &[],
    }
}

pub(super) fn el(c: char) -> Glyphs {
    match c {
        'a' => &["α", "ά"],
        'b' => &["β"],
        'c' => &["χ"],
        'd' => &["δ"],
        'e' => &["ε", "έ", "η", "ή"],
        'f' => &["φ"],
        'g' => &["γ"],
        'i' => &["ι", "ί"],
        'k' => &["κ"],
        'l' => &["λ"],
        'm' => &["μ"],
        'n' => &["ν"],
        'o' => &["ο", "ό", "ω", "ώ"],
        'p' => &["π", "φ", "ψ"],
        'r' => &["ρ"],
        's' => &["σ", "ς"],
        't' => &["τ", "θ", "ϑ"],
        'u' => &["υ", "ύ"],
        'x' => &["ξ"],
        'y' => &["υ"],
        'z' => &["ζ"],
        ',' => &["\"", "\"", "«", "»"],
        _ => &[],
    }
}

pub(super) fn he(c: char) -> Glyphs {
    match c {
        'a' => &["שׂ", "שׁ", "\u{05b0}"],
        'b' => &["׆"],
        'e' => &["\u{05b8}", "\u{05b3}", "\u{05bb}"],
        'g' => &["ױ"],
        'h' => &["ײ", "ײַ", "ׯ", "\u{05b4}"],
        'm' => &["\u{05b5}"],
        'p' => &["\u{05b7}", "\u{05b2}"],
        's' => &["\u{05bc}"],
        't' => &["ﭏ"],
        'u' => &["וֹ", "וּ", "װ", "\u{05b9}"],
        'x' => &["\u{05b6}", "\u{05b1}"],
        'y' => &["ױ"],
        ',' => &["\"", "'", "'", "״", "׳"],
        '.' => &["\u{05ab}", "\u{05bd}", "\u{05bf}"],
        '-' => &["־"],
        _ => &[],
    }
}

pub(super) fn hr(c: char) -> Glyphs {
    match c {
        'c' => &["ć", "č"],
        'd' => &["đ"],
        'e' => &["€"],
        's' => &["š"],
        'z' => &["ž"],
        ',' => &["„", "\"", "»", "«"],
        _ => &[],
    }
}

pub(super) fn hu(c: char) -> Glyphs {
    match c {
        'a' => &["á"],
        'e' => &["é"],
        'i' => &["í"],
        'o' => &["ó", "ő", "ö"],
        'u' => &["ú", "ű", "ü"],
        ',' => &["„", "\"", "»", "«"],
        _ => &[],
    }
}

pub(super) fn is(c: char) -> Glyphs {
    match c {
        'a' => &["á", "æ"],
        'd' => &["ð"],
        'e' => &["é"],
        'o' => &["ó", "ö"],
        'u' => &["ú"],
        'y' => &["ý"],
        't' => &["þ"],
        ',' => &["„", "\"", "‚", "'"],
        _ => &[],
    }
}

pub(super) fn ipa(c: char) -> Glyphs {
    match c {
        'a' => &["ā", "á", "ǎ", "à", "ɑ", "ɑ̄", "ɑ́", "ɑ̌", "ɑ̀"],
        'c' => &["ĉ"],
        'e' => &["ē", "é", "ě", "è", "ê", "ê̄", "ế", "ê̌", "ề"],
        'i' => &["ī", "í", "ǐ", "ì"],
        'm' => &["m̄", "ḿ", "m̌", "m̀"],
        'n' => &["n̄", "ń", "ň", "ǹ", "ŋ", "ŋ̄", "ŋ́", "ŋ̌", "ŋ̀"],
        'o' => &["ō", "ó", "ǒ", "ò"],
        's' => &["ŝ"],
        'u' => &["ū", "ú", "ǔ", "ù", "ü", "ǖ", "ǘ", "ǚ", "ǜ"],
        'v' => &["ü", "ǖ", "ǘ", "ǚ", "ǜ"],
        'y' => &["¥"],
        'z' => &["ẑ"],
        ',' => &["“", "”", "‘", "’", "「", "」", "『", "』"],
        _ => &[],
    }
}

pub(super) fn it(c: char) -> Glyphs {
    match c {
        'a' => &["à"],
        'e' => &["è", "é", "ə", "€"],
        'i' => &["ì", "í"],
        'o' => &["ò", "ó"],
        'u' => &["ù", "ú"],
        ',' => &["«", "»", "\"", "\"", "'", "'"],
        _ => &[],
    }
}

pub(super) fn ku(c: char) -> Glyphs {
    match c {
        'c' => &["ç"],
        'e' => &["ê", "€"],
        'i' => &["î"],
        'o' => &["ö", "ô"],
        'l' => &["ł"],
        'n' => &["ň"],
        'r' => &["ř"],
        's' => &["ş"],
        'u' => &["û", "ü"],
        ',' => &["«", "»", "“", "”"],
        _ => &[],
    }
}

pub(super) fn lt(c: char) -> Glyphs {
    match c {
        'a' => &["ą", "á", "à", "â", "ä", "ā"],
        'c' => &["č", "ć"],
        'e' => &["ė", "ę", "é", "è", "ê"],
        'i' => &["į", "í", "ì"],
        'y' => &["ý", "ÿ"],
        'u' => &["ū", "ú", "ù", "û", "ü"],
        'o' => &["ó", "ò", "ô", "ö", "ø"],
        _ => &[],
    }
}

pub(super) fn mi(c: char) -> Glyphs {
    match c {
        'a' => &["ā"],
        'e' => &["ē"],
        'i' => &["ī"],
        'o' => &["ō"],
        'u' => &["ū"],
        's' => &["$"],
        ',' => &["“", "”", "‘", "’"],
        _ => &[],
    }
}

pub(super) fn mk(c: char) -> Glyphs {
    match c {
        'e' => &["ѐ"],
        'i' => &["ѝ"],
        ',' => &["„", "“", "’", "‘"],
        _ => &[],
    }
}

pub(super) fn mt(c: char) -> Glyphs {
    match c {
        'a' => &["à"],
        'c' => &["ċ"],
        'e' => &["è", "€"],
        'g' => &["ġ"],
        'h' => &["ħ"],
        'i' => &["ì"],
        'o' => &["ò"],
        'u' => &["ù"],
        'z' => &["ż"],
        _ => &[],
    }
}

pub(super) fn nl(c: char) -> Glyphs {
    match c {
        'a' => &["á", "à", "ä"],
        'c' => &["ç"],
        'e' => &["é", "è", "ë", "ê", "€"],
        'i' => &["í", "ï", "î"],
        'n' => &["ñ"],
        'o' => &["ó", "ö", "ô"],
        'u' => &["ú", "ü", "û"],
        ',' => &["“", "„", "”", "‘", ",", "’"],
        _ => &[],
    }
}

pub(super) fn no(c: char) -> Glyphs {
    match c {
        'a' => &["å", "æ"],
        'e' => &["é", "è"],
        'i' => &["í"],
        'o' => &["ø", "ó", "ö"],
        'u' => &["ú", "ü"],
        'y' => &["ý"],
        ',' => &["“", "”", "‘", "’"],
        _ => &[],
    }
}

pub(super) fn pi(c: char) -> Glyphs {
    match c {
        'a' => &["ā", "á", "ǎ", "à", "ɑ", "ɑ̄", "ɑ́", "ɑ̌", "ɑ̀"],
        'c' => &["ĉ"],
        'e' => &["ē", "é", "ě", "è", "ê", "ê̄", "ế", "ê̌", "ề"],
        'i' => &["ī", "í", "ǐ", "ì"],
        'm' => &["m̄", "ḿ", "m̌", "m̀"],
        'n' => &["n̄", "ń", "ň", "ǹ", "ŋ", "ŋ̄", "ŋ́", "ŋ̌", "ŋ̀"],
        'o' => &["ō", "ó", "ǒ", "ò"],
        's' => &["ŝ"],
        'u' => &["ū", "ú", "ǔ", "ù", "ü", "ǖ", "ǘ", "ǚ", "ǜ"],
        'v' => &["ü", "ǖ", "ǘ", "ǚ", "ǜ"],
        'y' => &["¥"],
        'z' => &["ẑ"],
        ',' => &["“", "”", "‘", "’", "「", "」", "『", "』"],
        _ => &[],
    }
}

pub(super) fn pie(c: char) -> Glyphs {
    match c {
        'a' => &["ā"],
        'e' => &["ē"],
        'o' => &["ō"],
        'k' => &["ḱ"],
        'g' => &["ǵ"],
        'r' => &["r̥"],
        'l' => &["l̥"],
        'm' => &["m̥"],
        'n' => &["n̥"],
        _ => &[],
    }
}

pub(super) fn pl(c: char) -> Glyphs {
    match c {
        'a' => &["ą"],
        'c' => &["ć"],
        'e' => &["ę", "€"],
        'l' => &["ł"],
        'n' => &["ń"],
        'o' => &["ó"],
        's' => &["ś"],
        'z' => &["ż", "ź"],
        ',' => &["„", "\"", "'", "'", "»", "«"],
        _ => &[],
    }
}

pub(super) fn pt(c: char) -> Glyphs {
    match c {
        'a' => &["á", "à", "â", "ã", "ª"],
        'c' => &["ç"],
        'e' => &["é", "ê", "€"],
        'i' => &["í"],
        'o' => &["ô", "ó", "õ", "º"],
        's' => &["$"],
        'u' => &["ú"],
        ',' => &["\"", "\"", "'", "'", "«", "»"],
        _ => &[],
    }
}

pub(super) fn ro(c: char) -> Glyphs {
    match c {
        'a' => &["ă", "â"],
        'i' => &["î"],
        's' => &["ș"],
        't' => &["ț"],
        ',' => &["„", "”", "«", "»"],
        _ => &[],
    }
}

pub(super) fn rom(c: char) -> Glyphs {
    match c {
        'a' => &["á", "â", "ă", "ā"],
        'b' => &["ḇ"],
        'c' => &["č", "ç"],
        'd' => &["ḑ", "ḍ", "ḏ", "ḏ̇"],
        'e' => &["ê", "ě", "ĕ", "ē", "é", "ə"],
        'g' => &["ġ", "ǧ", "ğ", "ḡ", "g̃", "g̱"],
        'h' => &["ḧ", "ḩ", "ḥ", "ḫ", "ẖ"],
        'i' => &["í", "ı", "î", "ī", "ı̇̄"],
        'j' => &["ǰ", "j̱"],
        'k' => &["ḳ", "ḵ"],
        'l' => &["ł"],
        'n' => &["ⁿ", "ñ"],
        'o' => &["ó", "ô", "ö", "ŏ", "ō", "ȫ"],
        'p' => &["p̄"],
        'r' => &["ṙ", "ṛ"],
        's' => &["ś", "š", "ş", "ṣ", "s̱", "ṣ̄"],
        't' => &["ẗ", "ţ", "ṭ", "ṯ"],
        'u' => &["ú", "û", "ü", "ū", "ǖ"],
        'v' => &["v̇", "ṿ", "ᵛ"],
        'y' => &["\u{0300}y"],
        'z' => &["ż", "ž", "z̄", "z̧", "ẓ", "z̤", "ẕ"],
        '.' => &["’", "ʾ", "ʿ", "′", "…"],
        _ => &[],
    }
}

pub(super) fn sk(c: char) -> Glyphs {
    match c {
        'a' => &["á", "ä"],
        'c' => &["č"],
        'd' => &["ď"],
        'e' => &["é", "€"],
        'i' => &["í"],
        'l' => &["ľ", "ĺ"],
        'n' => &["ň"],
        'o' => &["ó", "ô"],
        'r' => &["ŕ"],
        's' => &["š"],
        't' => &["ť"],
        'u' => &["ú"],
        'y' => &["ý"],
        'z' => &["ž"],
        ',' => &["„", "“", "‚", "‘", "»", "«", "›", "‹"],
        _ => &[],
    }
}

pub(super) fn sl(c: char) -> Glyphs {
    match c {
        'c' => &["č", "ć"],
        's' => &["š"],
        'z' => &["ž"],
        ',' => &["„", "“", "‚", "‘", "»", "«", "›", "‹"],
        _ => &[],
    }
}

pub(super) fn sp(c: char) -> Glyphs {
    match c {
        'a' => &["á"],
        'e' => &["é", "€"],
        'h' => &["ḥ"],
        'i' => &["í"],
        'l' => &["ḷ"],
        'n' => &["ñ"],
        'o' => &["ó"],
        'u' => &["ú", "ü"],
        ',' => &["¿", "?", "¡", "!", "«", "»", "\"", "\"", "'", "'"],
        _ => &[],
    }
}

pub(super) fn sr(c: char) -> Glyphs {
    match c {
        'c' => &["ć", "č"],
        'd' => &["đ"],
        's' => &["š"],
        'z' => &["ž"],
        ',' => &["„", "“", "‚", "’", "»", "«", "›", "‹"],
        _ => &[],
    }
}

pub(super) fn sr_cyrl(c: char) -> Glyphs {
    match c {
        'd' => &["ђ", "џ"],
        'l' => &["љ"],
        'n' => &["њ"],
        'c' => &["ћ"],
        _ => &[],
    }
}

pub(super) fn sv(c: char) -> Glyphs {
    match c {
        'a' => &["å", "ä"],
        'e' => &["é"],
        'o' => &["ö"],
        ',' => &["”", "’", "»", "«"],
        _ => &[],
    }
}

pub(super) fn tk(c: char) -> Glyphs {
    match c {
        'a' => &["â"],
        'c' => &["ç"],
        'e' => &["ë", "€"],
        'g' => &["ğ"],
        'i' => &["ı", "İ", "î"],
        'o' => &["ö", "ô"],
        's' => &["ş"],
        't' => &["₺"],
        'u' => &["ü", "û"],
        ',' => &["\"", "\"", "'", "'", "«", "»", "‹", "›"],
        _ => &[],
    }
}

pub(super) fn vi(c: char) -> Glyphs {
    match c {
        'a' => &[
            "à", "ả", "ã", "á", "ạ", "ă", "ằ", "ẳ", "ẵ", "ắ", "ặ", "â", "ầ", "ẩ", "ẫ", "ấ", "ậ",
        ],
        'd' => &["đ"],
        'e' => &["è", "ẻ", "ẽ", "é", "ẹ", "ê", "ề", "ể", "ễ", "ế", "ệ"],
        'i' => &["ì", "ỉ", "ĩ", "í", "ị"],
        'o' => &[
            "ò", "ỏ", "õ", "ó", "ọ", "ô", "ồ", "ổ", "ỗ", "ố", "ộ", "ơ", "ờ", "ở", "ỡ", "ớ", "ợ",
        ],
        'u' => &["ù", "ủ", "ũ", "ú", "ụ", "ư", "ừ", "ử", "ữ", "ứ", "ự"],
        'y' => &["ỳ", "ỷ", "ỹ", "ý", "ỵ"],
        _ => &[],
    }
}
