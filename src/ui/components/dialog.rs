//! 모달 다이얼로그
//!
//! 파일 작업의 대상/이름 입력, 삭제 확인, 오류/정보 표시, 속성, 도움말

mod kind;
mod render;

pub use kind::{DialogKind, InputPurpose};
pub use render::{help_row_count, Dialog};
