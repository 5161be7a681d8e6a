//! Annotation cycle tests against an in-memory exchange.

use std::sync::Mutex;

use gn_annotator::core::types::CorrelationKey;
use gn_annotator::correlation::{Correlation, CorrelationStrategy};
use gn_annotator::{
    AnnotateError, AnnotationExchange, AnnotationResult, AnnotationStatus, Annotator,
    AnnotatorConfig, CorrelationPolicy, ExchangeError, FailureReason, GenomicLocationQuery,
    MutationRecord,
};
use serde_json::json;

/// Exchange answering every batch with a fixed response and recording what was sent
struct MockExchange {
    response: Result<Vec<AnnotationResult>, String>,
    submitted: Mutex<Vec<Vec<GenomicLocationQuery>>>,
}

impl MockExchange {
    fn answering(results: Vec<AnnotationResult>) -> Self {
        Self {
            response: Ok(results),
            submitted: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    fn submitted(&self) -> Vec<Vec<GenomicLocationQuery>> {
        self.submitted.lock().unwrap().clone()
    }
}

impl AnnotationExchange for MockExchange {
    async fn submit_batch(
        &self,
        queries: &[GenomicLocationQuery],
    ) -> Result<Vec<AnnotationResult>, ExchangeError> {
        self.submitted.lock().unwrap().push(queries.to_vec());
        self.response.clone().map_err(ExchangeError::Unavailable)
    }
}

fn braf_record() -> MutationRecord {
    MutationRecord::new("7", "140453136", "140453136", "A")
        .with_tumor_alleles("A", "T")
        .with_sample("P-0001")
}

fn kras_record() -> MutationRecord {
    MutationRecord::new("12", "25398284", "25398284", "C")
        .with_tumor_alleles("C", "T")
        .with_sample("P-0002")
}

fn braf_result() -> AnnotationResult {
    serde_json::from_value(json!({
        "variant": "7:g.140453136A>T",
        "originalVariantQuery": "7,140453136,140453136,A,T",
        "assembly_name": "GRCh37",
        "successfully_annotated": true,
        "colocatedVariants": [{"dbSnpId": "COSM476"}, {"dbSnpId": "rs113488022"}],
        "annotation_summary": {
            "genomicLocation": {
                "chromosome": "7", "start": 140453136, "end": 140453136,
                "referenceAllele": "A", "variantAllele": "T"
            },
            "strandSign": "-",
            "variantType": "SNP",
            "transcriptConsequences": [{
                "transcriptId": "ENST00000288602",
                "hugoGeneSymbol": "BRAF",
                "entrezGeneId": "673",
                "variantClassification": "Missense_Mutation",
                "hgvsc": "ENST00000288602.6:c.1799T>A",
                "hgvsp": "p.Val600Glu",
                "hgvspShort": "p.V600E",
                "refSeq": "NM_004333.4",
                "codonChange": "gTg/gAg",
                "consequenceTerms": "missense_variant",
                "proteinPosition": {"start": 600, "end": 600},
                "exon": "15/18",
                "siftPrediction": "deleterious",
                "siftScore": 0.0,
                "polyphenPrediction": "probably_damaging",
                "polyphenScore": 0.3333
            }]
        }
    }))
    .unwrap()
}

fn kras_result() -> AnnotationResult {
    serde_json::from_value(json!({
        "originalVariantQuery": "12,25398284,25398284,C,T",
        "assembly_name": "GRCh37",
        "successfully_annotated": true,
        "annotation_summary": {
            "variantType": "SNP",
            "transcriptConsequences": [{
                "hugoGeneSymbol": "KRAS",
                "hgvspShort": "p.G12D"
            }]
        }
    }))
    .unwrap()
}

/// Strategy returning no assignment slots at all
struct EmptyCorrelation;

impl CorrelationStrategy for EmptyCorrelation {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn correlate(
        &self,
        _queries: &[GenomicLocationQuery],
        _results: &[AnnotationResult],
    ) -> Correlation {
        Correlation::default()
    }
}

/// Strategy pointing every query one past the last result
struct StaleCorrelation;

impl CorrelationStrategy for StaleCorrelation {
    fn name(&self) -> &'static str {
        "stale"
    }

    fn correlate(
        &self,
        queries: &[GenomicLocationQuery],
        results: &[AnnotationResult],
    ) -> Correlation {
        Correlation {
            assignments: vec![Some(results.len()); queries.len()],
            ..Correlation::default()
        }
    }
}

fn annotator(exchange: MockExchange) -> Annotator<MockExchange> {
    Annotator::new(exchange, AnnotatorConfig::default()).unwrap()
}

#[tokio::test]
async fn test_single_record_fully_annotated() {
    let annotator = annotator(MockExchange::answering(vec![braf_result()]));
    let mut records = vec![braf_record()];

    let report = annotator.annotate(&mut records).await.unwrap();
    assert_eq!(report.submitted, 1);
    assert_eq!(report.succeeded, 1);
    assert!(report.is_complete());

    let record = &records[0];
    assert_eq!(record.annotation_status, Some(AnnotationStatus::Success));
    assert_eq!(record.hugo_symbol, "BRAF");
    assert_eq!(record.entrez_gene_id, "673");
    assert_eq!(record.ncbi_build, "GRCh37");
    assert_eq!(record.strand, "-");
    assert_eq!(record.variant_classification, "Missense_Mutation");
    assert_eq!(record.variant_type, "SNP");
    assert_eq!(record.dbsnp_rs, "rs113488022");
    assert_eq!(record.hgvsp_short, "p.V600E");
    assert_eq!(record.transcript_id, "ENST00000288602");
    assert_eq!(record.refseq, "NM_004333.4");
    assert_eq!(record.codons, "gTg/gAg");
    assert_eq!(record.consequence, "missense_variant");
    assert_eq!(record.protein_position, "600");
    assert_eq!(record.exon_number, "15/18");
    assert_eq!(record.sift_score, "0.0");
    assert_eq!(record.polyphen_score, "0.333");
    assert_eq!(record.reference_allele, "A");
    assert_eq!(record.tumor_seq_allele1, "A");
    assert_eq!(record.tumor_seq_allele2, "T");
    assert_eq!(record.tumor_sample_barcode, "P-0001");
}

#[tokio::test]
async fn test_submitted_queries_use_resolved_variant_allele() {
    let annotator = annotator(MockExchange::answering(Vec::new()));
    let mut records = vec![
        MutationRecord::new("1", "100", "100", "A").with_tumor_alleles("-", "AT"),
        MutationRecord::new("1", "200", "200", "G").with_tumor_alleles("NA", ""),
    ];

    annotator.annotate(&mut records).await.unwrap();

    let submitted = annotator.exchange().submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0][0].variant_allele, "AT");
    assert_eq!(submitted[0][0].key().as_str(), "1,100,100,A,AT");
    assert_eq!(submitted[0][1].variant_allele, "");
}

#[tokio::test]
async fn test_reordered_results_correlate_by_key() {
    let annotator = annotator(MockExchange::answering(vec![kras_result(), braf_result()]));
    let mut records = vec![braf_record(), kras_record()];

    annotator.annotate(&mut records).await.unwrap();

    assert_eq!(records[0].hugo_symbol, "BRAF");
    assert_eq!(records[1].hugo_symbol, "KRAS");
    assert_eq!(records[1].protein_position, "12");
}

#[tokio::test]
async fn test_duplicate_records_share_one_result() {
    let annotator = annotator(MockExchange::answering(vec![braf_result()]));
    let mut records = vec![braf_record(), braf_record().with_sample("P-0003")];

    let report = annotator.annotate(&mut records).await.unwrap();
    assert_eq!(report.succeeded, 2);

    let success = Some(AnnotationStatus::Success);
    assert_eq!(records[0].annotation_status, success);
    assert_eq!(records[1].annotation_status, success);
    assert_eq!(records[0].hugo_symbol, records[1].hugo_symbol);
    assert_eq!(records[0].hgvsc, records[1].hgvsc);
    assert_eq!(records[0].polyphen_score, records[1].polyphen_score);
    // Identity fields are not shared
    assert_eq!(records[1].tumor_sample_barcode, "P-0003");
}

#[tokio::test]
async fn test_missing_result_marks_record_unmatched() {
    let annotator = annotator(MockExchange::answering(vec![braf_result()]));
    let mut records = vec![braf_record(), kras_record()];
    let kras_before = records[1].clone();

    let report = annotator.annotate(&mut records).await.unwrap();
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.unmatched, 1);

    let success = Some(AnnotationStatus::Success);
    assert_eq!(records[0].annotation_status, success);
    let status = records[1].annotation_status.clone().unwrap();
    assert_eq!(
        status,
        AnnotationStatus::Failed {
            reason: FailureReason::Unmatched {
                key: CorrelationKey::new("12,25398284,25398284,C,T")
            }
        }
    );
    assert!(status.to_string().contains("12,25398284,25398284,C,T"));

    records[1].annotation_status = None;
    assert_eq!(records[1], kras_before);
}

#[tokio::test]
async fn test_unsuccessful_result_only_sets_status() {
    let mut failed = kras_result();
    failed.successfully_annotated = Some(false);
    let annotator = annotator(MockExchange::answering(vec![failed]));
    let mut records = vec![kras_record()];

    annotator.annotate(&mut records).await.unwrap();

    assert!(matches!(
        records[0].annotation_status,
        Some(AnnotationStatus::Failed {
            reason: FailureReason::Unsuccessful { .. }
        })
    ));
    assert_eq!(records[0].hugo_symbol, "");
}

#[tokio::test]
async fn test_duplicate_result_keeps_first() {
    let mut second = braf_result();
    if let Some(summary) = second.annotation_summary.as_mut() {
        summary.transcript_consequences = None;
    }
    let annotator = annotator(MockExchange::answering(vec![braf_result(), second]));
    let mut records = vec![braf_record()];

    let report = annotator.annotate(&mut records).await.unwrap();
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.uncorrelated, 0);
    assert_eq!(records[0].hugo_symbol, "BRAF");
}

#[tokio::test]
async fn test_unknown_and_missing_echo_are_ignored() {
    let mut unknown = kras_result();
    unknown.original_variant_query = Some("9,1,1,G,C".to_string());
    let mut silent = kras_result();
    silent.original_variant_query = None;
    let exchange = MockExchange::answering(vec![unknown, silent, braf_result()]);
    let annotator = annotator(exchange);
    let mut records = vec![braf_record()];

    let report = annotator.annotate(&mut records).await.unwrap();
    assert_eq!(report.uncorrelated, 2);
    assert_eq!(report.succeeded, 1);
}

#[tokio::test]
async fn test_exchange_failure_writes_no_status() {
    let annotator = annotator(MockExchange::failing("503 Service Unavailable"));
    let mut records = vec![braf_record(), kras_record()];
    let before = records.clone();

    let err = annotator.annotate(&mut records).await.unwrap_err();
    assert!(matches!(err, AnnotateError::Exchange(_)));
    assert!(err.to_string().contains("503 Service Unavailable"));
    assert_eq!(records, before);
    assert!(records.iter().all(|r| !r.is_resolved()));
}

#[tokio::test]
async fn test_annotation_is_deterministic() {
    let config = AnnotatorConfig::default();
    let mut first = vec![braf_record(), kras_record(), braf_record()];
    let mut second = first.clone();

    Annotator::new(
        MockExchange::answering(vec![braf_result(), kras_result()]),
        config,
    )
    .unwrap()
    .annotate(&mut first)
    .await
    .unwrap();
    Annotator::new(
        MockExchange::answering(vec![kras_result(), braf_result()]),
        config.sequential(),
    )
    .unwrap()
    .annotate(&mut second)
    .await
    .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_positional_correlation_reports_count_mismatch() {
    let config = AnnotatorConfig::default().with_correlation(CorrelationPolicy::Positional);
    let exchange = MockExchange::answering(vec![braf_result()]);
    let annotator = Annotator::new(exchange, config).unwrap();
    let mut records = vec![braf_record(), kras_record()];

    let report = annotator.annotate(&mut records).await.unwrap();

    let mismatch = report.count_mismatch.unwrap();
    assert_eq!(mismatch.submitted, 2);
    assert_eq!(mismatch.returned, 1);
    assert_eq!(records[0].hugo_symbol, "BRAF");
    assert!(matches!(
        records[1].annotation_status,
        Some(AnnotationStatus::Failed {
            reason: FailureReason::Unmatched { .. }
        })
    ));
}

#[tokio::test]
async fn test_custom_strategy_without_slots_marks_unmatched() {
    let exchange = MockExchange::answering(vec![braf_result(), kras_result()]);
    let strategy = Box::new(EmptyCorrelation);
    let annotator = annotator(exchange).with_strategy(strategy);
    let mut records = vec![braf_record(), kras_record()];
    let before = records.clone();

    let report = annotator.annotate(&mut records).await.unwrap();
    assert_eq!(report.succeeded, 0);
    assert_eq!(report.failed, 2);
    assert_eq!(report.unmatched, 2);

    for (record, original) in records.iter_mut().zip(&before) {
        let status = record.annotation_status.take().unwrap();
        assert!(status.is_unmatched(), "{status}");
        assert_eq!(*record, *original);
    }
}

#[tokio::test]
async fn test_custom_strategy_with_stale_index_marks_unmatched() {
    let exchange = MockExchange::answering(vec![braf_result()]);
    let config = AnnotatorConfig::default().sequential();
    let annotator = Annotator::new(exchange, config)
        .unwrap()
        .with_strategy(Box::new(StaleCorrelation));
    let mut records = vec![braf_record()];

    let report = annotator.annotate(&mut records).await.unwrap();
    assert_eq!(report.unmatched, 1);
    assert_eq!(records[0].hugo_symbol, "");
    let status = records[0].annotation_status.as_ref().unwrap();
    assert!(status.is_unmatched());
}
