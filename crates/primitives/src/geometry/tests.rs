use super::ClientRect;

#[test]
fn new_rect_clamps_negative_dimensions() {
	let rect = ClientRect::new(4.0, 4.0, -10.0, -1.0);
	assert_eq!(rect.width, 0.0);
	assert_eq!(rect.height, 0.0);
}

#[test]
fn caret_is_zero_width() {
	let caret = ClientRect::caret(42.0, 100.0, 18.0);
	assert_eq!(caret, ClientRect::new(42.0, 100.0, 0.0, 18.0));
}
