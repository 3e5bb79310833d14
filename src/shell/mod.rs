//! Shell-rc integration: installs a shell function that runs this binary and
//! `cd`s into its output when the jump exit code comes back.

use std::fs;
use std::path::Path;

use crate::bookmarks::JUMP_EXIT_CODE;
use crate::core::error::DmError;
use crate::error;
use crate::loggers::Logger;

pub const RC_NAME: &str = ".dirmarkrc";

const SOURCE_LINE: &str = "source ~/.dirmark/.dirmarkrc";
const USER_RC: [&str; 2] = [".bashrc", ".zshrc"];

/// Writes `<data_dir>/.dirmarkrc` with the jump helper aliased to `name`,
/// then sources it from the user's bashrc/zshrc when not already done.
pub async fn init(name: &str, data_dir: &Path, logger: &Logger) -> Result<(), DmError> {
    let exe = match std::env::current_exe() {
        Ok(p) => p,
        Err(e) => return Err(error!(logger, "get program path err[{}]", e).await),
    };
    let abs = match std::path::absolute(&exe) {
        Ok(p) => p,
        Err(e) => return Err(error!(logger, "get program abs path err[{}]", e).await),
    };

    let content = rc_content(name, &abs.to_string_lossy());
    if let Err(e) = fs::write(data_dir.join(RC_NAME), content) {
        return Err(error!(logger, "write rc file err[{}]", e).await);
    }

    let Some(home) = dirs::home_dir() else {
        return Err(error!(logger, "resolve home dir err").await);
    };
    for rc in USER_RC {
        let rc_path = home.join(rc);
        // absent or unreadable shell rc files are skipped
        let Ok(existing) = fs::read_to_string(&rc_path) else {
            continue;
        };
        if existing.contains(SOURCE_LINE) {
            continue;
        }
        let updated = format!("{existing}\n{SOURCE_LINE}\n");
        if let Err(e) = fs::write(&rc_path, updated) {
            return Err(error!(logger, "write rc file err[{}]", e).await);
        }
    }

    Ok(())
}

fn rc_content(name: &str, exe: &str) -> String {
    format!(
        r#"
# case-insensitive tab completion while jumping
bind "set completion-ignore-case on"

# run dirmark; exit code {code} means stdout is a directory to jump into
dirmarkFun() {{
    res="`{exe} $@`"
    if [ $? -eq {code} ]; then
        cd $res
    else
        echo "$res"
    fi
}}

alias {name}="dirmarkFun"
"#,
        code = JUMP_EXIT_CODE,
        exe = exe,
        name = name,
    )
}
