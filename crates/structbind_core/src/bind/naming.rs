/// Convert a wire-style key (`user_name`) into declared style (`userName`).
///
/// Every `_` followed by an ASCII letter is dropped and the letter
/// upper-cased. The first character is then upper-cased when
/// `capitalize_first` is set (accessor names) and lower-cased otherwise
/// (field lookup).
pub fn to_declared_style(key: &str, capitalize_first: bool) -> String {
	let mut out = String::with_capacity(key.len());
	let mut chars = key.chars().peekable();

	while let Some(ch) = chars.next() {
		if ch == '_'
			&& let Some(next) = chars.peek().copied()
			&& next.is_ascii_alphabetic()
		{
			out.push(next.to_ascii_uppercase());
			chars.next();
			continue;
		}
		out.push(ch);
	}

	with_first_case(out, capitalize_first)
}

/// Convert a declared name (`userName`) into wire style (`user_name`).
///
/// Not the exact inverse of [`to_declared_style`] for acronyms:
/// `URLValue` becomes `u_r_l_value`.
pub fn to_wire_style(name: &str) -> String {
	let mut out = String::with_capacity(name.len() + 4);
	for ch in name.chars() {
		if ch.is_ascii_uppercase() {
			out.push('_');
		}
		out.push(ch.to_ascii_lowercase());
	}
	out.trim_matches('_').to_owned()
}

/// Lower-case the first character, leaving the rest untouched.
pub(crate) fn lower_first(name: &str) -> String {
	with_first_case(name.to_owned(), false)
}

fn with_first_case(mut name: String, upper: bool) -> String {
	if let Some(first) = name.get_mut(0..1) {
		if upper {
			first.make_ascii_uppercase();
		} else {
			first.make_ascii_lowercase();
		}
	}
	name
}
