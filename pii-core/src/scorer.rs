//! # Scorer de Entidades (ponto de extensão)
//!
//! O analisador não sabe *como* os candidatos são produzidos. O registro de
//! reconhecedores é a implementação embutida; um modelo estatístico externo
//! (NER treinado, serviço remoto) pode ser plugado no lugar sem tocar no
//! anonimizador nem no failsafe.
//!
//! Um scorer externo pode falhar ([`ScorerError::Unavailable`]). Nesse caso o
//! pipeline degrada para cobertura apenas do failsafe em vez de recusar a
//! chamada.

use crate::error::ScorerError;
use crate::span::Match;

/// Produz spans candidatos pontuados para um texto.
pub trait EntityScorer: Send + Sync {
    /// Nome curto para logs (nunca inclui texto do usuário).
    fn name(&self) -> &str;

    /// Tipos de entidade que este scorer sabe produzir.
    fn supported_entities(&self) -> Vec<String>;

    /// Candidatos brutos: offsets de byte no texto recebido, sem limiar e
    /// possivelmente sobrepostos.
    fn score(&self, text: &str) -> Result<Vec<Match>, ScorerError>;
}
