use std::future::Future;

use crate::common::error::AppError;

// Efeitos colaterais de melhor esforço (sincronizar feed, registrar tenant
// no serviço de busca) rodam como tarefas destacadas: a operação que os
// disparou NÃO espera por eles e nunca vê o erro deles. A falha é capturada
// aqui e vai apenas para o log.
pub fn fire_and_forget<F>(context: &'static str, task: F)
where
    F: Future<Output = Result<(), AppError>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = task.await {
            tracing::error!("Tarefa em segundo plano '{}' falhou: {}", context, err);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn falha_da_tarefa_nao_propaga() {
        // O spawn não pode entrar em pânico nem devolver o erro ao chamador.
        fire_and_forget("teste", async { Err(AppError::SlugTaken) });
        fire_and_forget("teste-ok", async { Ok(()) });
        // Dá chance das tarefas rodarem até o fim.
        tokio::task::yield_now().await;
    }
}
