//! Built-in seed shortcut table.
//!
//! Substituted whenever the shortcut file is missing or cannot be used, and
//! written out as the initial file on first start.

use crate::description::Description;
use crate::table::{DEFAULT_APP, ShortcutTable};

/// `(application, combo label, key, en, zh)` rows of the seed table.
const SEED: &[(&str, &str, &str, &str, &str)] = &[
    ("NOTEPAD.EXE", "Ctrl", "S", "Save File", "保存文件"),
    ("NOTEPAD.EXE", "Ctrl", "O", "Open File", "打开文件"),
    ("NOTEPAD.EXE", "Ctrl", "N", "New File", "新建文件"),
    (DEFAULT_APP, "Ctrl", "C", "Copy (Global)", "复制 (全局)"),
    (DEFAULT_APP, "Ctrl", "V", "Paste (Global)", "粘贴 (全局)"),
    (DEFAULT_APP, "Ctrl", "X", "Cut (Global)", "剪切 (全局)"),
    (DEFAULT_APP, "Alt", "F4", "Close Window", "关闭窗口"),
];

/// The built-in table used on first start and as the fallback for a bad file.
pub fn seed_table() -> ShortcutTable {
    let mut table = ShortcutTable::new();
    for (app, combo, key, en, zh) in SEED {
        let description = Description::localized([("en", *en), ("zh", *zh)]);
        if let Err(e) = table.set_shortcut(app, combo, key, description) {
            // Only reachable if the constant rows above are edited into nonsense.
            log::error!("Invalid seed shortcut {app} / {combo} / {key}: {e}");
        }
    }
    table
}
