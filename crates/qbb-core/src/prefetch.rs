//! 置換表プリフェッチ
//!
//! 次に参照するエントリを事前にキャッシュに読み込むことで、
//! メモリアクセスのレイテンシを隠蔽する。

/// `ptr` を含むキャッシュラインをL1にプリフェッチする
#[inline]
pub(crate) fn prefetch_line<T>(ptr: *const T) {
    #[cfg(target_arch = "x86_64")]
    // SAFETY: プリフェッチは命令ヒントであり、無効なアドレスでもフォールトしない
    unsafe {
        use std::arch::x86_64::{_MM_HINT_T0, _mm_prefetch};
        _mm_prefetch(ptr as *const i8, _MM_HINT_T0);
    }

    #[cfg(not(target_arch = "x86_64"))]
    let _ = ptr; // 何もしない
}
