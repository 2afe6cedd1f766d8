use std::env;

pub fn insta_snapshot<F: FnOnce()>(f: F) {
    let mut settings = insta::Settings::clone_current();
    let snapshot_path = env::current_dir().unwrap().join("./test/snapshots");
    settings.set_snapshot_path(snapshot_path);
    settings.bind(f);
}

pub fn health_answer_fixture() -> &'static str {
    return r#"
Đau đầu nhẹ thường do thiếu ngủ, căng thẳng hoặc thiếu nước.

- Uống đủ nước trong ngày.
- Nghỉ ngơi ở nơi yên tĩnh, tránh màn hình.
- Có thể dùng paracetamol theo liều hướng dẫn.

Nếu đau đầu kéo dài hơn 3 ngày hoặc kèm sốt cao, hãy đi khám bác sĩ.
"#
    .trim();
}

pub fn translated_answer_fixture() -> &'static str {
    return r#"
Un léger mal de tête est souvent dû au manque de sommeil, au stress ou à la déshydratation.

Si le mal de tête dure plus de 3 jours ou s'accompagne d'une forte fièvre, consultez un médecin.
"#
    .trim();
}
