use futures::stream::{self, StreamExt};
use std::future::Future;

/// 以限定并发度执行一组future，全部完成后按完成顺序返回结果
pub async fn do_parallel_with_limit<F, T>(futures: Vec<F>, limit: usize) -> Vec<T>
where
    F: Future<Output = T>,
{
    stream::iter(futures)
        .buffer_unordered(limit.max(1))
        .collect()
        .await
}
